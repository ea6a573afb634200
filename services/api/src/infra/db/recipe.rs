use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
    sea_query::{Expr, Query},
};

use foodgram_api_schema::{
    favorites, recipe_ingredients, recipe_tags, recipes, shopping_carts, tags,
};
use foodgram_core::sea_ext::Paginate as _;
use foodgram_domain::id::{RecipeId, UserId};
use foodgram_domain::pagination::PageRequest;

use super::catalog::{ingredient_from_model, tag_from_model};
use super::is_unique_violation;
use crate::domain::repository::RecipeRepository;
use crate::domain::types::{Recipe, RecipeDraft, RecipeFilter, RecipeIngredient, Tag};
use crate::error::FoodgramError;

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

fn duplicate_name() -> FoodgramError {
    FoodgramError::field("name", "You already have a recipe with this name.")
}

fn map_write_err(err: DbErr, operation: &'static str) -> FoodgramError {
    if is_unique_violation(&err) {
        duplicate_name()
    } else {
        anyhow::Error::new(err).context(operation).into()
    }
}

/// Delete-then-insert the tag and ingredient rows of `recipe_id`.
async fn replace_components<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    draft: &RecipeDraft,
) -> Result<(), FoodgramError> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await
        .context("clear recipe tags")?;
    recipe_ingredients::Entity::delete_many()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await
        .context("clear recipe ingredients")?;

    if !draft.tags.is_empty() {
        recipe_tags::Entity::insert_many(draft.tags.iter().map(|tag| recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag.0),
        }))
        .exec_without_returning(conn)
        .await
        .context("insert recipe tags")?;
    }
    if !draft.ingredients.is_empty() {
        recipe_ingredients::Entity::insert_many(draft.ingredients.iter().map(|line| {
            recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id.0),
                amount: Set(line.amount),
                ..Default::default()
            }
        }))
        .exec_without_returning(conn)
        .await
        .context("insert recipe ingredients")?;
    }
    Ok(())
}

/// `recipes.id IN (SELECT recipe_id FROM <join> WHERE user_id = ?)`.
fn held_by(
    query: Select<recipes::Entity>,
    table: impl sea_orm::sea_query::IntoTableRef,
    recipe_col: impl sea_orm::sea_query::IntoColumnRef,
    user_col: impl sea_orm::sea_query::IntoColumnRef,
    user: UserId,
) -> Select<recipes::Entity> {
    query.filter(
        recipes::Column::Id.in_subquery(
            Query::select()
                .column(recipe_col)
                .from(table)
                .and_where(Expr::col(user_col).eq(user.0))
                .to_owned(),
        ),
    )
}

fn filtered(filter: &RecipeFilter) -> Select<recipes::Entity> {
    let mut query = recipes::Entity::find();
    if let Some(author) = filter.author {
        query = query.filter(recipes::Column::AuthorId.eq(author.0));
    }
    if !filter.tags.is_empty() {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                    .from(recipe_tags::Entity)
                    .inner_join(
                        tags::Entity,
                        Expr::col((tags::Entity, tags::Column::Id))
                            .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                    )
                    .and_where(
                        Expr::col((tags::Entity, tags::Column::Slug))
                            .is_in(filter.tags.iter().cloned()),
                    )
                    .to_owned(),
            ),
        );
    }
    if let Some(user) = filter.favorited_by {
        query = held_by(
            query,
            favorites::Entity,
            favorites::Column::RecipeId,
            favorites::Column::UserId,
            user,
        );
    }
    if let Some(user) = filter.in_cart_of {
        query = held_by(
            query,
            shopping_carts::Entity,
            shopping_carts::Column::RecipeId,
            shopping_carts::Column::UserId,
            user,
        );
    }
    query
}

impl RecipeRepository for DbRecipeRepository {
    async fn find(&self, id: RecipeId) -> Result<Option<Recipe>, FoodgramError> {
        let model = recipes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find recipe")?;
        Ok(model.map(recipe_from_model))
    }

    async fn name_taken(
        &self,
        author: UserId,
        name: &str,
        exclude: Option<RecipeId>,
    ) -> Result<bool, FoodgramError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author.0))
            .filter(recipes::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(recipes::Column::Id.ne(id.0));
        }
        let count = query.count(&self.db).await.context("check recipe name")?;
        Ok(count > 0)
    }

    async fn create(&self, author: UserId, draft: &RecipeDraft) -> Result<Recipe, FoodgramError> {
        let txn = self.db.begin().await.context("begin create recipe")?;
        let model = recipes::ActiveModel {
            author_id: Set(author.0),
            name: Set(draft.name.clone()),
            image: Set(draft.image.clone()),
            text: Set(draft.text.clone()),
            cooking_time: Set(draft.cooking_time),
            pub_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_write_err(e, "insert recipe"))?;
        replace_components(&txn, model.id, draft).await?;
        txn.commit().await.context("commit create recipe")?;
        Ok(recipe_from_model(model))
    }

    async fn update(&self, id: RecipeId, draft: &RecipeDraft) -> Result<Recipe, FoodgramError> {
        let txn = self.db.begin().await.context("begin update recipe")?;
        let model = recipes::ActiveModel {
            id: Set(id.0),
            name: Set(draft.name.clone()),
            image: Set(draft.image.clone()),
            text: Set(draft.text.clone()),
            cooking_time: Set(draft.cooking_time),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => FoodgramError::RecipeNotFound,
            e => map_write_err(e, "update recipe"),
        })?;
        replace_components(&txn, model.id, draft).await?;
        txn.commit().await.context("commit update recipe")?;
        Ok(recipe_from_model(model))
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, FoodgramError> {
        let result = recipes::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), FoodgramError> {
        let count = filtered(filter)
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = filtered(filter)
            .order_by_desc(recipes::Column::PubDate)
            .order_by_desc(recipes::Column::Id)
            .paginate_by(page)
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok((models.into_iter().map(recipe_from_model).collect(), count))
    }

    async fn list_by_author(
        &self,
        author: UserId,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, FoodgramError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author.0))
            .order_by_desc(recipes::Column::PubDate)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn count_by_author(&self, author: UserId) -> Result<u64, FoodgramError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author.0))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }

    async fn tags_for(
        &self,
        ids: &[RecipeId],
    ) -> Result<HashMap<RecipeId, Vec<Tag>>, FoodgramError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(recipe_tags::Column::TagId)
            .find_also_related(tags::Entity)
            .all(&self.db)
            .await
            .context("load recipe tags")?;
        let mut by_recipe: HashMap<RecipeId, Vec<Tag>> = HashMap::new();
        for (link, tag) in rows {
            if let Some(tag) = tag {
                by_recipe
                    .entry(RecipeId(link.recipe_id))
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }
        Ok(by_recipe)
    }

    async fn ingredients_for(
        &self,
        ids: &[RecipeId],
    ) -> Result<HashMap<RecipeId, Vec<RecipeIngredient>>, FoodgramError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(recipe_ingredients::Column::Id)
            .find_also_related(foodgram_api_schema::ingredients::Entity)
            .all(&self.db)
            .await
            .context("load recipe ingredients")?;
        let mut by_recipe: HashMap<RecipeId, Vec<RecipeIngredient>> = HashMap::new();
        for (line, ingredient) in rows {
            if let Some(ingredient) = ingredient {
                by_recipe
                    .entry(RecipeId(line.recipe_id))
                    .or_default()
                    .push(RecipeIngredient {
                        ingredient: ingredient_from_model(ingredient),
                        amount: line.amount,
                    });
            }
        }
        Ok(by_recipe)
    }
}

pub(super) fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: RecipeId(model.id),
        author_id: UserId(model.author_id),
        name: model.name,
        image: model.image,
        text: model.text,
        cooking_time: model.cooking_time,
        pub_date: model.pub_date,
    }
}
