use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use foodgram_api::config::ApiConfig;
use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_auth_types::token::TokenSecret;
use foodgram_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("foodgram_api=info,tower_http=info");

    let config = ApiConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db,
        token_secret: TokenSecret::new(config.jwt_secret),
        token_ttl_secs: config.token_ttl_secs,
        shopping_list_filename: config.shopping_list_filename.into(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("foodgram listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
