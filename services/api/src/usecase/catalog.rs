use foodgram_domain::id::{IngredientId, TagId};

use crate::domain::repository::CatalogRepository;
use crate::domain::types::{Ingredient, Tag};
use crate::error::FoodgramError;

pub struct ListIngredientsUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> ListIngredientsUseCase<R> {
    pub async fn execute(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let prefix = name_prefix.map(str::trim).filter(|p| !p.is_empty());
        self.repo.list_ingredients(prefix).await
    }
}

pub struct GetIngredientUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: IngredientId) -> Result<Ingredient, FoodgramError> {
        self.repo
            .find_ingredient(id)
            .await?
            .ok_or(FoodgramError::IngredientNotFound)
    }
}

pub struct ListTagsUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, FoodgramError> {
        self.repo.list_tags().await
    }
}

pub struct GetTagUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: TagId) -> Result<Tag, FoodgramError> {
        self.repo
            .find_tag(id)
            .await?
            .ok_or(FoodgramError::TagNotFound)
    }
}
