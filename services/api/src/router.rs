use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower::ServiceBuilder;

use foodgram_core::health::healthz;
use foodgram_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    auth::{login, logout},
    catalog::{get_ingredient, get_tag, list_ingredients, list_tags},
    collection::{add_favorite, add_to_cart, remove_favorite, remove_from_cart},
    follow::{list_subscriptions, subscribe, unsubscribe},
    recipe::{
        create_recipe, delete_recipe, download_shopping_cart, get_recipe, list_recipes,
        update_recipe,
    },
    user::{create_user, get_me, get_user, list_users, set_password},
};
use crate::state::AppState;

/// Handler for `GET /readyz`: 200 when the database answers a ping.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/token/login/", post(login))
        .route("/api/auth/token/logout/", post(logout))
        // Users
        .route("/api/users/", get(list_users).post(create_user))
        .route("/api/users/me/", get(get_me))
        .route("/api/users/set_password/", post(set_password))
        .route("/api/users/subscriptions/", get(list_subscriptions))
        .route("/api/users/{id}/", get(get_user))
        .route("/api/users/{id}/subscribe/", post(subscribe).delete(unsubscribe))
        // Catalog
        .route("/api/tags/", get(list_tags))
        .route("/api/tags/{id}/", get(get_tag))
        .route("/api/ingredients/", get(list_ingredients))
        .route("/api/ingredients/{id}/", get(get_ingredient))
        // Recipes
        .route("/api/recipes/", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route(
            "/api/recipes/{id}/favorite/",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(add_to_cart).delete(remove_from_cart),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(trace_layer()),
        )
        .with_state(state)
}
