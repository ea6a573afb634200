use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::QueryRejection;
use serde::Serialize;

use crate::domain::types::Collection;

/// Field name used for errors that do not belong to one input field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation messages keyed by input field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error
    /// carrying every message.
    pub fn into_result(self) -> Result<(), FoodgramError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FoodgramError::Validation(self))
        }
    }
}

/// Foodgram service error variants.
#[derive(Debug, thiserror::Error)]
pub enum FoodgramError {
    #[error("invalid input")]
    Validation(FieldErrors),
    #[error("unable to log in with provided credentials")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("user with this email or username already exists")]
    UserAlreadyExists,
    #[error("cannot subscribe to yourself")]
    SelfFollow,
    #[error("already subscribed to this author")]
    AlreadySubscribed,
    #[error("not subscribed to this author")]
    NotSubscribed,
    #[error("recipe does not exist")]
    RecipeUnavailable,
    #[error("recipe is already in {0}")]
    AlreadyInCollection(Collection),
    #[error("recipe is not in {0}")]
    NotInCollection(Collection),
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FoodgramError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::SelfFollow => "SELF_FOLLOW",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::RecipeUnavailable => "RECIPE_UNAVAILABLE",
            Self::AlreadyInCollection(Collection::Favorites) => "ALREADY_IN_FAVORITES",
            Self::AlreadyInCollection(Collection::ShoppingCart) => "ALREADY_IN_SHOPPING_CART",
            Self::NotInCollection(Collection::Favorites) => "NOT_IN_FAVORITES",
            Self::NotInCollection(Collection::ShoppingCart) => "NOT_IN_SHOPPING_CART",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidCredentials
            | Self::UserAlreadyExists
            | Self::SelfFollow
            | Self::AlreadySubscribed
            | Self::NotSubscribed
            | Self::RecipeUnavailable
            | Self::AlreadyInCollection(_)
            | Self::NotInCollection(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for a validation error on one field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

impl From<JsonRejection> for FoodgramError {
    fn from(rejection: JsonRejection) -> Self {
        Self::field(NON_FIELD_ERRORS, rejection.body_text())
    }
}

impl From<PathRejection> for FoodgramError {
    fn from(rejection: PathRejection) -> Self {
        Self::field(NON_FIELD_ERRORS, rejection.body_text())
    }
}

impl From<QueryRejection> for FoodgramError {
    fn from(rejection: QueryRejection) -> Self {
        Self::field(NON_FIELD_ERRORS, rejection.to_string())
    }
}

impl IntoResponse for FoodgramError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(ref errors) = self {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
