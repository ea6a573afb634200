use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::Identity;

use crate::error::FoodgramError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase};

// ── POST /api/auth/token/login/ ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub auth_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, FoodgramError> {
    let Json(body) = body?;
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        secret: state.token_secret.clone(),
        ttl_secs: state.token_ttl_secs,
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        auth_token: output.auth_token,
    }))
}

// ── POST /api/auth/token/logout/ ─────────────────────────────────────────────

/// Tokens are stateless; the client discards its copy.
pub async fn logout(identity: Identity) -> StatusCode {
    tracing::debug!(user_id = %identity.user_id, "logout");
    StatusCode::NO_CONTENT
}
