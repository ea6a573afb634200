use std::collections::HashSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{OnConflict, Query},
};

use foodgram_api_schema::{favorites, ingredients, recipe_ingredients, shopping_carts};
use foodgram_domain::id::{IngredientId, RecipeId, UserId};

use crate::domain::repository::CollectionRepository;
use crate::domain::types::{CartIngredientRow, Collection};
use crate::error::FoodgramError;

#[derive(Clone)]
pub struct DbCollectionRepository {
    pub db: DatabaseConnection,
}

impl CollectionRepository for DbCollectionRepository {
    async fn add(
        &self,
        collection: Collection,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, FoodgramError> {
        let now = Utc::now();
        let rows = match collection {
            Collection::Favorites => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user.0),
                    recipe_id: Set(recipe.0),
                    added_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user.0),
                    recipe_id: Set(recipe.0),
                    added_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        }
        .with_context(|| format!("add recipe to {collection}"))?;
        Ok(rows > 0)
    }

    async fn remove(
        &self,
        collection: Collection,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, FoodgramError> {
        let result = match collection {
            Collection::Favorites => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user.0))
                    .filter(favorites::Column::RecipeId.eq(recipe.0))
                    .exec(&self.db)
                    .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user.0))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe.0))
                    .exec(&self.db)
                    .await
            }
        }
        .with_context(|| format!("remove recipe from {collection}"))?;
        Ok(result.rows_affected > 0)
    }

    async fn marked_among(
        &self,
        collection: Collection,
        user: UserId,
        recipes: &[RecipeId],
    ) -> Result<HashSet<RecipeId>, FoodgramError> {
        if recipes.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = recipes.iter().map(|r| r.0);
        let found: Vec<i32> = match collection {
            Collection::Favorites => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user.0))
                    .filter(favorites::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user.0))
                    .filter(shopping_carts::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
        }
        .with_context(|| format!("find recipes in {collection}"))?;
        Ok(found.into_iter().map(RecipeId).collect())
    }

    async fn cart_ingredients(
        &self,
        user: UserId,
    ) -> Result<Vec<CartIngredientRow>, FoodgramError> {
        let rows = recipe_ingredients::Entity::find()
            .filter(
                recipe_ingredients::Column::RecipeId.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(shopping_carts::Column::UserId.eq(user.0))
                        .to_owned(),
                ),
            )
            .order_by_asc(recipe_ingredients::Column::RecipeId)
            .order_by_asc(recipe_ingredients::Column::Id)
            .find_also_related(ingredients::Entity)
            .all(&self.db)
            .await
            .context("load cart ingredients")?;
        Ok(rows
            .into_iter()
            .filter_map(|(line, ingredient)| {
                ingredient.map(|ingredient| CartIngredientRow {
                    ingredient_id: IngredientId(ingredient.id),
                    name: ingredient.name,
                    measurement_unit: ingredient.measurement_unit,
                    amount: line.amount,
                })
            })
            .collect())
    }
}
