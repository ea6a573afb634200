use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderMap, StatusCode, Uri},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::error::FoodgramError;
use crate::handlers::dto::SubscriptionResponse;
use crate::handlers::pagination::page_of;
use crate::state::AppState;
use crate::usecase::follow::{ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase};

#[derive(Deserialize, Default)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u64>,
}

// ── GET /api/users/subscriptions/ ────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<SubscriptionQuery>, QueryRejection>,
) -> Result<Json<Page<SubscriptionResponse>>, FoodgramError> {
    let Query(query) = query?;
    let page = PageRequest::from_query(query.limit, query.page);
    let usecase = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let (authors, count) = usecase
        .execute(identity.user_id, page, query.recipes_limit)
        .await?;
    let results = authors.into_iter().map(SubscriptionResponse::from).collect();
    Ok(Json(page_of(&uri, &headers, page, count, results)))
}

// ── POST /api/users/{id}/subscribe/ ──────────────────────────────────────────

pub async fn subscribe(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<SubscriptionQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), FoodgramError> {
    let Path(id) = path?;
    let Query(query) = query?;
    let usecase = SubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let author = usecase
        .execute(identity.user_id, UserId(id), query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(SubscriptionResponse::from(author))))
}

// ── DELETE /api/users/{id}/subscribe/ ────────────────────────────────────────

pub async fn unsubscribe(
    identity: Identity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, FoodgramError> {
    let Path(id) = path?;
    let usecase = UnsubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(identity.user_id, UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
