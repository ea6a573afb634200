#![allow(async_fn_in_trait)]

use std::collections::{HashMap, HashSet};

use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{
    CartIngredientRow, Collection, Ingredient, NewUser, Recipe, RecipeDraft, RecipeFilter,
    RecipeIngredient, Tag, User,
};
use crate::error::FoodgramError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FoodgramError>;
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, FoodgramError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FoodgramError>;

    /// Insert a user. A taken email or username yields `UserAlreadyExists`.
    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError>;

    /// Users ordered by id, plus the total count.
    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), FoodgramError>;

    async fn update_password(&self, id: UserId, password_hash: &str)
    -> Result<(), FoodgramError>;
}

/// Repository for the follower -> author relation.
pub trait FollowRepository: Send + Sync {
    /// Create an edge. Returns `false` if it already existed.
    async fn create(&self, user: UserId, author: UserId) -> Result<bool, FoodgramError>;

    /// Delete an edge. Returns `true` if a row was deleted.
    async fn delete(&self, user: UserId, author: UserId) -> Result<bool, FoodgramError>;

    /// The subset of `authors` that `user` follows.
    async fn followed_among(
        &self,
        user: UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, FoodgramError>;

    /// Authors followed by `user` ordered by id, plus the total count.
    async fn list_authors(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), FoodgramError>;
}

/// Repository for ingredients and tags.
pub trait CatalogRepository: Send + Sync {
    /// Ingredients ordered by name, optionally restricted to a
    /// case-insensitive name prefix.
    async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, FoodgramError>;
    async fn find_ingredient(&self, id: IngredientId)
    -> Result<Option<Ingredient>, FoodgramError>;
    async fn existing_ingredient_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<HashSet<IngredientId>, FoodgramError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, FoodgramError>;
    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, FoodgramError>;
    async fn existing_tag_ids(&self, ids: &[TagId]) -> Result<HashSet<TagId>, FoodgramError>;

    /// Insert unless (name, unit) exists. Returns `true` if a row was created.
    async fn ensure_ingredient(&self, name: &str, unit: &str) -> Result<bool, FoodgramError>;

    /// Insert unless the slug exists. Returns `true` if a row was created.
    async fn ensure_tag(&self, name: &str, color: &str, slug: &str)
    -> Result<bool, FoodgramError>;
}

/// Repository for recipes and their tag/ingredient associations.
pub trait RecipeRepository: Send + Sync {
    async fn find(&self, id: RecipeId) -> Result<Option<Recipe>, FoodgramError>;

    /// Whether `author` owns a recipe called `name`, ignoring `exclude`.
    async fn name_taken(
        &self,
        author: UserId,
        name: &str,
        exclude: Option<RecipeId>,
    ) -> Result<bool, FoodgramError>;

    /// Insert the recipe with its tags and ingredient lines in one transaction.
    async fn create(&self, author: UserId, draft: &RecipeDraft) -> Result<Recipe, FoodgramError>;

    /// Overwrite scalar fields and replace tags and ingredient lines in one
    /// transaction. `pub_date` is left untouched.
    async fn update(&self, id: RecipeId, draft: &RecipeDraft) -> Result<Recipe, FoodgramError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: RecipeId) -> Result<bool, FoodgramError>;

    /// Recipes matching `filter`, newest first, plus the total count.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), FoodgramError>;

    /// Newest recipes of `author`, at most `limit` when given.
    async fn list_by_author(
        &self,
        author: UserId,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, FoodgramError>;

    async fn count_by_author(&self, author: UserId) -> Result<u64, FoodgramError>;

    async fn tags_for(
        &self,
        ids: &[RecipeId],
    ) -> Result<HashMap<RecipeId, Vec<Tag>>, FoodgramError>;

    async fn ingredients_for(
        &self,
        ids: &[RecipeId],
    ) -> Result<HashMap<RecipeId, Vec<RecipeIngredient>>, FoodgramError>;
}

/// Repository for favorites and shopping cart rows.
pub trait CollectionRepository: Send + Sync {
    /// Add a row. Returns `false` if it already existed.
    async fn add(
        &self,
        collection: Collection,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, FoodgramError>;

    /// Remove a row. Returns `true` if a row was deleted.
    async fn remove(
        &self,
        collection: Collection,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, FoodgramError>;

    /// The subset of `recipes` that `user` holds in `collection`.
    async fn marked_among(
        &self,
        collection: Collection,
        user: UserId,
        recipes: &[RecipeId],
    ) -> Result<HashSet<RecipeId>, FoodgramError>;

    /// Every ingredient line of every recipe in the user's cart.
    async fn cart_ingredients(&self, user: UserId)
    -> Result<Vec<CartIngredientRow>, FoodgramError>;
}
