use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::RecipeId;

use crate::domain::types::Collection;
use crate::error::FoodgramError;
use crate::handlers::dto::RecipeShortResponse;
use crate::state::AppState;
use crate::usecase::collection::{AddToCollectionUseCase, RemoveFromCollectionUseCase};

async fn add(
    state: &AppState,
    collection: Collection,
    identity: Identity,
    id: i32,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    let usecase = AddToCollectionUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    let summary = usecase
        .execute(collection, identity.user_id, RecipeId(id))
        .await?;
    Ok((StatusCode::CREATED, Json(RecipeShortResponse::from(summary))))
}

async fn remove(
    state: &AppState,
    collection: Collection,
    identity: Identity,
    id: i32,
) -> Result<StatusCode, FoodgramError> {
    let usecase = RemoveFromCollectionUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    usecase
        .execute(collection, identity.user_id, RecipeId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST / DELETE /api/recipes/{id}/favorite/ ────────────────────────────────

pub async fn add_favorite(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    let Path(id) = path?;
    add(&state, Collection::Favorites, identity, id).await
}

pub async fn remove_favorite(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, FoodgramError> {
    let Path(id) = path?;
    remove(&state, Collection::Favorites, identity, id).await
}

// ── POST / DELETE /api/recipes/{id}/shopping_cart/ ───────────────────────────

pub async fn add_to_cart(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    let Path(id) = path?;
    add(&state, Collection::ShoppingCart, identity, id).await
}

pub async fn remove_from_cart(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, FoodgramError> {
    let Path(id) = path?;
    remove(&state, Collection::ShoppingCart, identity, id).await
}
