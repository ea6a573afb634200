use std::collections::HashSet;

use anyhow::Context as _;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, Func, LikeExpr, OnConflict},
};

use foodgram_api_schema::{ingredients, tags};
use foodgram_domain::id::{IngredientId, TagId};

use crate::domain::repository::CatalogRepository;
use crate::domain::types::{Ingredient, Tag};
use crate::error::FoodgramError;

#[derive(Clone)]
pub struct DbCatalogRepository {
    pub db: DatabaseConnection,
}

/// Lowercased LIKE pattern matching names that start with `prefix` literally.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn like_prefix(prefix: &str) -> LikeExpr {
    LikeExpr::new(prefix_pattern(prefix)).escape('\\')
}

impl CatalogRepository for DbCatalogRepository {
    async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, FoodgramError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix.filter(|p| !p.is_empty()) {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name)))
                    .like(like_prefix(prefix)),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, FoodgramError> {
        let model = ingredients::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find ingredient")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_ingredient_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<HashSet<IngredientId>, FoodgramError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .into_tuple()
            .all(&self.db)
            .await
            .context("check ingredient ids")?;
        Ok(found.into_iter().map(IngredientId).collect())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, FoodgramError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, FoodgramError> {
        let model = tags::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find tag")?;
        Ok(model.map(tag_from_model))
    }

    async fn existing_tag_ids(&self, ids: &[TagId]) -> Result<HashSet<TagId>, FoodgramError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .into_tuple()
            .all(&self.db)
            .await
            .context("check tag ids")?;
        Ok(found.into_iter().map(TagId).collect())
    }

    async fn ensure_ingredient(&self, name: &str, unit: &str) -> Result<bool, FoodgramError> {
        let rows = ingredients::Entity::insert(ingredients::ActiveModel {
            name: Set(name.to_owned()),
            measurement_unit: Set(unit.to_owned()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                ingredients::Column::Name,
                ingredients::Column::MeasurementUnit,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("ensure ingredient")?;
        Ok(rows > 0)
    }

    async fn ensure_tag(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<bool, FoodgramError> {
        let rows = tags::Entity::insert(tags::ActiveModel {
            name: Set(name.to_owned()),
            color: Set(color.to_owned()),
            slug: Set(slug.to_owned()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(tags::Column::Slug)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("ensure tag")?;
        Ok(rows > 0)
    }
}

pub(super) fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: IngredientId(model.id),
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

pub(super) fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: TagId(model.id),
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}
