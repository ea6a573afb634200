use foodgram_domain::id::UserId;
use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{AuthorProfile, RecipeSummary, User, UserProfile};
use crate::error::FoodgramError;

/// Profile of a followed author with their newest recipes.
///
/// A `recipes_limit` of 0 means no cap.
async fn followed_author<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<AuthorProfile, FoodgramError> {
    let recipes_limit = recipes_limit.filter(|&limit| limit > 0);
    let preview = recipes.list_by_author(author.id, recipes_limit).await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(AuthorProfile {
        profile: UserProfile {
            user: author,
            is_subscribed: true,
        },
        recipes: preview.iter().map(RecipeSummary::from).collect(),
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U: UserRepository, F: FollowRepository, R: RecipeRepository> {
    pub users: U,
    pub follows: F,
    pub recipes: R,
}

impl<U: UserRepository, F: FollowRepository, R: RecipeRepository> SubscribeUseCase<U, F, R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        author_id: UserId,
        recipes_limit: Option<u64>,
    ) -> Result<AuthorProfile, FoodgramError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        if user_id == author_id {
            return Err(FoodgramError::SelfFollow);
        }
        if !self.follows.create(user_id, author_id).await? {
            return Err(FoodgramError::AlreadySubscribed);
        }
        tracing::info!(user_id = %user_id, author_id = %author_id, "subscribed");
        followed_author(&self.recipes, author, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> UnsubscribeUseCase<U, F> {
    pub async fn execute(&self, user_id: UserId, author_id: UserId) -> Result<(), FoodgramError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(FoodgramError::UserNotFound);
        }
        if !self.follows.delete(user_id, author_id).await? {
            return Err(FoodgramError::NotSubscribed);
        }
        tracing::info!(user_id = %user_id, author_id = %author_id, "unsubscribed");
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository, R: RecipeRepository> {
    pub follows: F,
    pub recipes: R,
}

impl<F: FollowRepository, R: RecipeRepository> ListSubscriptionsUseCase<F, R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<(Vec<AuthorProfile>, u64), FoodgramError> {
        let (authors, count) = self.follows.list_authors(user_id, page).await?;
        let mut profiles = Vec::with_capacity(authors.len());
        for author in authors {
            profiles.push(followed_author(&self.recipes, author, recipes_limit).await?);
        }
        Ok((profiles, count))
    }
}
