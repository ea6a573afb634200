//! JSON representations shared by several endpoints.

use serde::Serialize;

use crate::domain::types::{
    AuthorProfile, Ingredient, RecipeDetail, RecipeIngredient, RecipeSummary, Tag, User,
    UserProfile,
};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        let User {
            id,
            email,
            username,
            first_name,
            last_name,
            ..
        } = profile.user;
        Self {
            email,
            id: id.0,
            username,
            first_name,
            last_name,
            is_subscribed: profile.is_subscribed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.0,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.0,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.ingredient.id.0,
            name: line.ingredient.name,
            measurement_unit: line.ingredient.measurement_unit,
            amount: line.amount,
        }
    }
}

/// Short card returned by favorite/cart endpoints and subscription previews.
#[derive(Debug, Serialize)]
pub struct RecipeShortResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeShortResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.0,
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeDetail> for RecipeResponse {
    fn from(detail: RecipeDetail) -> Self {
        Self {
            id: detail.recipe.id.0,
            tags: detail.tags.into_iter().map(TagResponse::from).collect(),
            author: UserResponse::from(detail.author),
            ingredients: detail
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited: detail.is_favorited,
            is_in_shopping_cart: detail.is_in_shopping_cart,
            name: detail.recipe.name,
            image: detail.recipe.image,
            text: detail.recipe.text,
            cooking_time: detail.recipe.cooking_time,
        }
    }
}

/// Followed author with a recipe preview.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: u64,
}

impl From<AuthorProfile> for SubscriptionResponse {
    fn from(author: AuthorProfile) -> Self {
        Self {
            user: UserResponse::from(author.profile),
            recipes: author
                .recipes
                .into_iter()
                .map(RecipeShortResponse::from)
                .collect(),
            recipes_count: author.recipes_count,
        }
    }
}
