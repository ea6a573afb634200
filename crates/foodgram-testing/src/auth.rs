//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs a real access token with a throwaway secret so requests go
//! through the same `Identity` extractor as production traffic.

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};

use foodgram_auth_types::token::{TokenSecret, issue_access_token};
use foodgram_domain::id::UserId;

/// Secret shared between `MockAuth` and the app state built in tests.
pub const TEST_TOKEN_SECRET: &str = "test-token-secret-for-integration-tests";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: UserId,
}

impl MockAuth {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Secret the app under test must be configured with.
    pub fn secret() -> TokenSecret {
        TokenSecret::new(TEST_TOKEN_SECRET)
    }

    /// `Token <jwt>` value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        let (token, _) = issue_access_token(self.user_id, &Self::secret(), 3600)
            .unwrap_or_else(|e| panic!("failed to sign test token: {e}"));
        format!("Token {token}")
    }

    /// Return headers as a logged-in client would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let value = HeaderValue::from_str(&self.authorization())
            .unwrap_or_else(|e| panic!("invalid authorization header: {e}"));
        map.insert(AUTHORIZATION, value);
        map
    }
}
