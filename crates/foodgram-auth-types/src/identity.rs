//! Token-authenticated identity extractors.

use axum::extract::{FromRef, FromRequestParts};
use http::request::Parts;
use http::{HeaderMap, StatusCode, header::AUTHORIZATION};

use foodgram_domain::id::UserId;

use crate::token::{TokenSecret, validate_access_token};

/// Authorization schemes accepted in front of the token.
pub const TOKEN_SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// Authenticated caller. Extraction fails with 401 when no valid token is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

/// Caller that may be anonymous.
///
/// A missing `Authorization` header yields `MaybeIdentity(None)`; a header that
/// is present but carries a bad token still fails with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.map(|identity| identity.user_id)
    }
}

/// Resolve the caller from request headers.
pub fn authenticate(
    headers: &HeaderMap,
    secret: &TokenSecret,
) -> Result<Option<Identity>, StatusCode> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if !TOKEN_SCHEMES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(scheme))
    {
        return Err(StatusCode::UNAUTHORIZED);
    }
    match validate_access_token(token.trim(), secret) {
        Ok(info) => Ok(Some(Identity {
            user_id: info.user_id,
        })),
        Err(e) => {
            tracing::debug!(error = %e, "rejected access token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    TokenSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Resolve synchronously and return a 'static future so the borrow of
    // `parts` does not leak into the returned future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let resolved = authenticate(&parts.headers, &secret);
        async move { resolved?.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    TokenSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let resolved = authenticate(&parts.headers, &secret);
        async move { resolved.map(MaybeIdentity) }
    }
}
