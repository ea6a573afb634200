use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use foodgram_auth_types::identity::{Identity, MaybeIdentity};
use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::types::IngredientAmount;
use crate::error::FoodgramError;
use crate::handlers::dto::RecipeResponse;
use crate::handlers::pagination::page_of;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesInput,
    ListRecipesUseCase, RecipeInput, UpdateRecipeUseCase,
};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

/// Body of both create (POST) and partial update (PATCH).
#[derive(Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

impl From<RecipeRequest> for RecipeInput {
    fn from(body: RecipeRequest) -> Self {
        Self {
            name: body.name,
            image: body.image,
            text: body.text,
            cooking_time: body.cooking_time,
            tags: body.tags.map(|ids| ids.into_iter().map(TagId).collect()),
            ingredients: body.ingredients.map(|lines| {
                lines
                    .into_iter()
                    .map(|line| IngredientAmount {
                        ingredient_id: IngredientId(line.id),
                        amount: line.amount,
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

/// `1` and `true` switch a flag filter on; anything else leaves it off.
fn flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}

async fn render_for(
    state: &AppState,
    viewer: Option<UserId>,
    id: RecipeId,
) -> Result<RecipeResponse, FoodgramError> {
    let usecase = GetRecipeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    Ok(RecipeResponse::from(usecase.execute(viewer, id).await?))
}

// ── GET /api/recipes/ ────────────────────────────────────────────────────────

pub async fn list_recipes(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<RecipeListQuery>, QueryRejection>,
) -> Result<Json<Page<RecipeResponse>>, FoodgramError> {
    let Query(query) = query?;
    let page = PageRequest::from_query(query.limit, query.page);
    let usecase = ListRecipesUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    let input = ListRecipesInput {
        author: query.author.map(UserId),
        tags: query.tags,
        is_favorited: flag(query.is_favorited.as_deref()),
        is_in_shopping_cart: flag(query.is_in_shopping_cart.as_deref()),
    };
    let (details, count) = usecase.execute(viewer.user_id(), input, page).await?;
    let results = details.into_iter().map(RecipeResponse::from).collect();
    Ok(Json(page_of(&uri, &headers, page, count, results)))
}

// ── POST /api/recipes/ ───────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodgramError> {
    let Json(body) = body?;
    let usecase = CreateRecipeUseCase {
        catalog: state.catalog_repo(),
        recipes: state.recipe_repo(),
    };
    let recipe = usecase.execute(identity.user_id, body.into()).await?;
    let response = render_for(&state, Some(identity.user_id), recipe.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ── GET /api/recipes/{id}/ ───────────────────────────────────────────────────

pub async fn get_recipe(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let Path(id) = path?;
    Ok(Json(render_for(&state, viewer.user_id(), RecipeId(id)).await?))
}

// ── PATCH /api/recipes/{id}/ ─────────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let Path(id) = path?;
    let Json(body) = body?;
    let usecase = UpdateRecipeUseCase {
        catalog: state.catalog_repo(),
        recipes: state.recipe_repo(),
    };
    let recipe = usecase
        .execute(identity.user_id, RecipeId(id), body.into())
        .await?;
    Ok(Json(
        render_for(&state, Some(identity.user_id), recipe.id).await?,
    ))
}

// ── DELETE /api/recipes/{id}/ ────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, FoodgramError> {
    let Path(id) = path?;
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    usecase.execute(identity.user_id, RecipeId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/recipes/download_shopping_cart/ ─────────────────────────────────

pub async fn download_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Response, FoodgramError> {
    let usecase = DownloadShoppingListUseCase {
        collections: state.collection_repo(),
    };
    let body = usecase.execute(identity.user_id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.shopping_list_filename.replace('"', "")
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| anyhow::Error::new(e).context("build content-disposition"))?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
