use foodgram_domain::id::UserId;
use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::types::{NewUser, User, UserProfile};
use crate::domain::validation::{check_email, check_password, check_person_name, check_username};
use crate::error::{FieldErrors, FoodgramError};
use crate::infra::password::{spawn_hash_password, spawn_verify_password};

/// Attach `is_subscribed` relative to `viewer`. Anonymous viewers and a
/// user looking at themselves always get `false`.
pub async fn profiles_for<F: FollowRepository>(
    follows: &F,
    viewer: Option<UserId>,
    users: Vec<User>,
) -> Result<Vec<UserProfile>, FoodgramError> {
    let followed = match viewer {
        Some(viewer) => {
            let ids: Vec<UserId> = users.iter().map(|u| u.id).collect();
            follows.followed_among(viewer, &ids).await?
        }
        None => Default::default(),
    };
    Ok(users
        .into_iter()
        .map(|user| UserProfile {
            is_subscribed: viewer != Some(user.id) && followed.contains(&user.id),
            user,
        })
        .collect())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, FoodgramError> {
        let mut errors = FieldErrors::new();
        if let Some(msg) = check_email(&input.email) {
            errors.add("email", msg);
        }
        if let Some(msg) = check_username(&input.username) {
            errors.add("username", msg);
        }
        if let Some(msg) = check_person_name(&input.first_name) {
            errors.add("first_name", msg);
        }
        if let Some(msg) = check_person_name(&input.last_name) {
            errors.add("last_name", msg);
        }
        for msg in check_password(&input.password) {
            errors.add("password", msg);
        }
        if !input.password.is_empty() && input.password == input.username {
            errors.add("password", "The password is too similar to the username.");
        }
        if !errors.has("first_name")
            && !errors.has("last_name")
            && input.first_name == input.last_name
        {
            errors.add("last_name", "First and last name must differ.");
        }
        if !errors.has("email") && self.repo.find_by_email(&input.email).await?.is_some() {
            errors.add("email", "A user with that email already exists.");
        }
        if !errors.has("username")
            && self.repo.find_by_username(&input.username).await?.is_some()
        {
            errors.add("username", "A user with that username already exists.");
        }
        errors.into_result()?;

        let password_hash = spawn_hash_password(input.password).await?;
        self.repo
            .create(&NewUser {
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password_hash,
            })
            .await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository, F: FollowRepository> {
    pub repo: R,
    pub follows: F,
}

impl<R: UserRepository, F: FollowRepository> GetUserUseCase<R, F> {
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
        id: UserId,
    ) -> Result<UserProfile, FoodgramError> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        let mut profiles = profiles_for(&self.follows, viewer, vec![user]).await?;
        profiles.pop().ok_or(FoodgramError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository, F: FollowRepository> {
    pub repo: R,
    pub follows: F,
}

impl<R: UserRepository, F: FollowRepository> ListUsersUseCase<R, F> {
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<(Vec<UserProfile>, u64), FoodgramError> {
        let (users, count) = self.repo.list(page).await?;
        let profiles = profiles_for(&self.follows, viewer, users).await?;
        Ok((profiles, count))
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct SetPasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SetPasswordUseCase<R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: SetPasswordInput,
    ) -> Result<(), FoodgramError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;

        let mut errors = FieldErrors::new();
        if input.current_password.is_empty() {
            errors.add("current_password", crate::domain::validation::REQUIRED);
        } else if !spawn_verify_password(input.current_password.clone(), user.password_hash)
            .await?
        {
            errors.add("current_password", "Invalid password.");
        }
        for msg in check_password(&input.new_password) {
            errors.add("new_password", msg);
        }
        if !input.new_password.is_empty() && input.new_password == input.current_password {
            errors.add(
                "new_password",
                "The new password must differ from the current one.",
            );
        }
        errors.into_result()?;

        let password_hash = spawn_hash_password(input.new_password).await?;
        self.repo.update_password(user_id, &password_hash).await?;
        tracing::info!(user_id = %user_id, "password changed");
        Ok(())
    }
}
