use foodgram_domain::id::{RecipeId, UserId};

use crate::domain::repository::{CollectionRepository, RecipeRepository};
use crate::domain::types::{Collection, RecipeSummary};
use crate::error::FoodgramError;

// ── AddToCollection ──────────────────────────────────────────────────────────

pub struct AddToCollectionUseCase<R: RecipeRepository, C: CollectionRepository> {
    pub recipes: R,
    pub collections: C,
}

impl<R: RecipeRepository, C: CollectionRepository> AddToCollectionUseCase<R, C> {
    /// A missing recipe is rejected with 400, not 404.
    pub async fn execute(
        &self,
        collection: Collection,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<RecipeSummary, FoodgramError> {
        let recipe = self
            .recipes
            .find(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeUnavailable)?;
        if !self.collections.add(collection, user_id, recipe_id).await? {
            return Err(FoodgramError::AlreadyInCollection(collection));
        }
        tracing::info!(user_id = %user_id, recipe_id = %recipe_id, %collection, "recipe added");
        Ok(RecipeSummary::from(&recipe))
    }
}

// ── RemoveFromCollection ─────────────────────────────────────────────────────

pub struct RemoveFromCollectionUseCase<R: RecipeRepository, C: CollectionRepository> {
    pub recipes: R,
    pub collections: C,
}

impl<R: RecipeRepository, C: CollectionRepository> RemoveFromCollectionUseCase<R, C> {
    /// Deletes the join row only.
    pub async fn execute(
        &self,
        collection: Collection,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<(), FoodgramError> {
        if self.recipes.find(recipe_id).await?.is_none() {
            return Err(FoodgramError::RecipeNotFound);
        }
        if !self.collections.remove(collection, user_id, recipe_id).await? {
            return Err(FoodgramError::NotInCollection(collection));
        }
        tracing::info!(user_id = %user_id, recipe_id = %recipe_id, %collection, "recipe removed");
        Ok(())
    }
}
