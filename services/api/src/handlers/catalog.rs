use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use foodgram_domain::id::{IngredientId, TagId};

use crate::error::FoodgramError;
use crate::handlers::dto::{IngredientResponse, TagResponse};
use crate::state::AppState;
use crate::usecase::catalog::{
    GetIngredientUseCase, GetTagUseCase, ListIngredientsUseCase, ListTagsUseCase,
};

// ── GET /api/ingredients/ ────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct IngredientQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    query: Result<Query<IngredientQuery>, QueryRejection>,
) -> Result<Json<Vec<IngredientResponse>>, FoodgramError> {
    let Query(query) = query?;
    let usecase = ListIngredientsUseCase {
        repo: state.catalog_repo(),
    };
    let ingredients = usecase.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

// ── GET /api/ingredients/{id}/ ───────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<IngredientResponse>, FoodgramError> {
    let Path(id) = path?;
    let usecase = GetIngredientUseCase {
        repo: state.catalog_repo(),
    };
    let ingredient = usecase.execute(IngredientId(id)).await?;
    Ok(Json(IngredientResponse::from(ingredient)))
}

// ── GET /api/tags/ ───────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, FoodgramError> {
    let usecase = ListTagsUseCase {
        repo: state.catalog_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{id}/ ──────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<TagResponse>, FoodgramError> {
    let Path(id) = path?;
    let usecase = GetTagUseCase {
        repo: state.catalog_repo(),
    };
    let tag = usecase.execute(TagId(id)).await?;
    Ok(Json(TagResponse::from(tag)))
}
