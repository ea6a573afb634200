use foodgram_auth_types::token::{TokenSecret, issue_access_token};

use crate::domain::repository::UserRepository;
use crate::domain::validation::REQUIRED;
use crate::error::{FieldErrors, FoodgramError};
use crate::infra::password::spawn_verify_password;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Issued access token and its expiry (seconds since epoch).
#[derive(Debug)]
pub struct LoginOutput {
    pub auth_token: String,
    pub expires_at: u64,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub secret: TokenSecret,
    pub ttl_secs: u64,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, FoodgramError> {
        let mut errors = FieldErrors::new();
        if input.email.is_empty() {
            errors.add("email", REQUIRED);
        }
        if input.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.into_result()?;

        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(FoodgramError::InvalidCredentials)?;
        if !spawn_verify_password(input.password, user.password_hash.clone()).await? {
            return Err(FoodgramError::InvalidCredentials);
        }

        let (auth_token, expires_at) = issue_access_token(user.id, &self.secret, self.ttl_secs)
            .map_err(|e| anyhow::Error::new(e).context("issue access token"))?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginOutput {
            auth_token,
            expires_at,
        })
    }
}
