use std::collections::{HashMap, HashSet};

use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::{
    CatalogRepository, CollectionRepository, FollowRepository, RecipeRepository, UserRepository,
};
use crate::domain::types::{
    Collection, IngredientAmount, Recipe, RecipeDetail, RecipeDraft, RecipeFilter, UserProfile,
};
use crate::domain::validation::{REQUIRED, validate_recipe_draft};
use crate::error::{FieldErrors, FoodgramError};
use crate::usecase::user::profiles_for;

/// Recipe fields as sent by the client. `None` means the field was omitted.
#[derive(Debug, Clone, Default)]
pub struct RecipeInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub tags: Option<Vec<TagId>>,
    pub ingredients: Option<Vec<IngredientAmount>>,
}

/// Fill omitted scalar fields from `base`; with no base they are required.
/// `tags` and `ingredients` are always required.
pub fn resolve_draft(
    input: RecipeInput,
    base: Option<&Recipe>,
    errors: &mut FieldErrors,
) -> RecipeDraft {
    fn pick<T>(
        value: Option<T>,
        stored: Option<T>,
        field: &str,
        fallback: T,
        errors: &mut FieldErrors,
    ) -> T {
        match value.or(stored) {
            Some(v) => v,
            None => {
                errors.add(field, REQUIRED);
                fallback
            }
        }
    }

    RecipeDraft {
        name: pick(input.name, base.map(|r| r.name.clone()), "name", String::new(), errors),
        image: pick(input.image, base.map(|r| r.image.clone()), "image", String::new(), errors),
        text: pick(input.text, base.map(|r| r.text.clone()), "text", String::new(), errors),
        cooking_time: pick(
            input.cooking_time,
            base.map(|r| r.cooking_time),
            "cooking_time",
            0,
            errors,
        ),
        tags: pick(input.tags, None, "tags", Vec::new(), errors),
        ingredients: pick(input.ingredients, None, "ingredients", Vec::new(), errors),
    }
}

/// Run every draft rule that needs the store, collecting all failures.
async fn check_draft<C: CatalogRepository, R: RecipeRepository>(
    catalog: &C,
    recipes: &R,
    author: UserId,
    draft: &RecipeDraft,
    exclude: Option<RecipeId>,
    mut errors: FieldErrors,
) -> Result<(), FoodgramError> {
    let known_tags = catalog.existing_tag_ids(&draft.tags).await?;
    let ingredient_ids: Vec<IngredientId> =
        draft.ingredients.iter().map(|l| l.ingredient_id).collect();
    let known_ingredients = catalog.existing_ingredient_ids(&ingredient_ids).await?;
    validate_recipe_draft(draft, &known_tags, &known_ingredients, &mut errors);

    if !errors.has("name") && recipes.name_taken(author, &draft.name, exclude).await? {
        errors.add("name", "You already have a recipe with this name.");
    }
    errors.into_result()
}

/// Attach tags, ingredient lines, author profile and per-viewer flags.
pub async fn assemble_details<U, F, R, C>(
    users: &U,
    follows: &F,
    recipes: &R,
    collections: &C,
    viewer: Option<UserId>,
    list: Vec<Recipe>,
) -> Result<Vec<RecipeDetail>, FoodgramError>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
    C: CollectionRepository,
{
    let ids: Vec<RecipeId> = list.iter().map(|r| r.id).collect();
    let mut author_ids: Vec<UserId> = list.iter().map(|r| r.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors = users.find_by_ids(&author_ids).await?;
    let authors: HashMap<UserId, UserProfile> = profiles_for(follows, viewer, authors)
        .await?
        .into_iter()
        .map(|p| (p.user.id, p))
        .collect();
    let mut tags = recipes.tags_for(&ids).await?;
    let mut ingredients = recipes.ingredients_for(&ids).await?;
    let (favorited, in_cart) = match viewer {
        Some(viewer) => (
            collections
                .marked_among(Collection::Favorites, viewer, &ids)
                .await?,
            collections
                .marked_among(Collection::ShoppingCart, viewer, &ids)
                .await?,
        ),
        None => (HashSet::new(), HashSet::new()),
    };

    let mut details = Vec::with_capacity(list.len());
    for recipe in list {
        let Some(author) = authors.get(&recipe.author_id).cloned() else {
            return Err(anyhow::anyhow!(
                "recipe {} references missing author {}",
                recipe.id,
                recipe.author_id
            )
            .into());
        };
        details.push(RecipeDetail {
            tags: tags.remove(&recipe.id).unwrap_or_default(),
            ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
            is_favorited: favorited.contains(&recipe.id),
            is_in_shopping_cart: in_cart.contains(&recipe.id),
            author,
            recipe,
        });
    }
    Ok(details)
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<U, F, R, C> {
    pub users: U,
    pub follows: F,
    pub recipes: R,
    pub collections: C,
}

impl<U, F, R, C> GetRecipeUseCase<U, F, R, C>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
    C: CollectionRepository,
{
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
        id: RecipeId,
    ) -> Result<RecipeDetail, FoodgramError> {
        let recipe = self
            .recipes
            .find(id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        let mut details = assemble_details(
            &self.users,
            &self.follows,
            &self.recipes,
            &self.collections,
            viewer,
            vec![recipe],
        )
        .await?;
        details.pop().ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ListRecipesInput {
    pub author: Option<UserId>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

pub struct ListRecipesUseCase<U, F, R, C> {
    pub users: U,
    pub follows: F,
    pub recipes: R,
    pub collections: C,
}

impl<U, F, R, C> ListRecipesUseCase<U, F, R, C>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
    C: CollectionRepository,
{
    /// The favorites and cart flags only apply to authenticated viewers.
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
        input: ListRecipesInput,
        page: PageRequest,
    ) -> Result<(Vec<RecipeDetail>, u64), FoodgramError> {
        let filter = RecipeFilter {
            author: input.author,
            tags: input.tags,
            favorited_by: viewer.filter(|_| input.is_favorited),
            in_cart_of: viewer.filter(|_| input.is_in_shopping_cart),
        };
        let (list, count) = self.recipes.list(&filter, page).await?;
        let details = assemble_details(
            &self.users,
            &self.follows,
            &self.recipes,
            &self.collections,
            viewer,
            list,
        )
        .await?;
        Ok((details, count))
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<K: CatalogRepository, R: RecipeRepository> {
    pub catalog: K,
    pub recipes: R,
}

impl<K: CatalogRepository, R: RecipeRepository> CreateRecipeUseCase<K, R> {
    pub async fn execute(
        &self,
        author: UserId,
        input: RecipeInput,
    ) -> Result<Recipe, FoodgramError> {
        let mut errors = FieldErrors::new();
        let draft = resolve_draft(input, None, &mut errors);
        check_draft(&self.catalog, &self.recipes, author, &draft, None, errors).await?;
        let recipe = self.recipes.create(author, &draft).await?;
        tracing::info!(recipe_id = %recipe.id, author_id = %author, "recipe created");
        Ok(recipe)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<K: CatalogRepository, R: RecipeRepository> {
    pub catalog: K,
    pub recipes: R,
}

impl<K: CatalogRepository, R: RecipeRepository> UpdateRecipeUseCase<K, R> {
    pub async fn execute(
        &self,
        caller: UserId,
        id: RecipeId,
        input: RecipeInput,
    ) -> Result<Recipe, FoodgramError> {
        let existing = self
            .recipes
            .find(id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if existing.author_id != caller {
            return Err(FoodgramError::Forbidden);
        }
        let mut errors = FieldErrors::new();
        let draft = resolve_draft(input, Some(&existing), &mut errors);
        check_draft(&self.catalog, &self.recipes, caller, &draft, Some(id), errors).await?;
        let recipe = self.recipes.update(id, &draft).await?;
        tracing::info!(recipe_id = %id, "recipe updated");
        Ok(recipe)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, caller: UserId, id: RecipeId) -> Result<(), FoodgramError> {
        let existing = self
            .recipes
            .find(id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if existing.author_id != caller {
            return Err(FoodgramError::Forbidden);
        }
        if !self.recipes.delete(id).await? {
            return Err(FoodgramError::RecipeNotFound);
        }
        tracing::info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }
}
