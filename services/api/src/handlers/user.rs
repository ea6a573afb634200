use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, Uri},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::{Identity, MaybeIdentity};
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::error::FoodgramError;
use crate::handlers::dto::UserResponse;
use crate::handlers::pagination::page_of;
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetPasswordInput,
    SetPasswordUseCase,
};

// ── GET /api/users/ ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn list_users(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> Result<Json<Page<UserResponse>>, FoodgramError> {
    let Query(query) = query?;
    let page = PageRequest::from_query(query.limit, query.page);
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    let (profiles, count) = usecase.execute(viewer.user_id(), page).await?;
    let results = profiles.into_iter().map(UserResponse::from).collect();
    Ok(Json(page_of(&uri, &headers, page, count, results)))
}

// ── POST /api/users/ ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

/// Registration echoes the profile without `is_subscribed` or the password.
#[derive(Serialize)]
pub struct CreatedUserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), FoodgramError> {
    let Json(body) = body?;
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            email: user.email,
            id: user.id.0,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}

// ── GET /api/users/{id}/ ─────────────────────────────────────────────────────

pub async fn get_user(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let Path(id) = path?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    let profile = usecase.execute(viewer.user_id(), UserId(id)).await?;
    Ok(Json(UserResponse::from(profile)))
}

// ── GET /api/users/me/ ───────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    let profile = usecase
        .execute(Some(identity.user_id), identity.user_id)
        .await?;
    Ok(Json(UserResponse::from(profile)))
}

// ── POST /api/users/set_password/ ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

pub async fn set_password(
    identity: Identity,
    State(state): State<AppState>,
    body: Result<Json<SetPasswordRequest>, JsonRejection>,
) -> Result<StatusCode, FoodgramError> {
    let Json(body) = body?;
    let usecase = SetPasswordUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            SetPasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
