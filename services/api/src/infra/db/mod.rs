//! sea-orm backed repositories.

mod catalog;
mod collection;
mod follow;
mod recipe;
mod user;

use sea_orm::{DbErr, SqlErr};

pub use catalog::DbCatalogRepository;
pub use collection::DbCollectionRepository;
pub use follow::DbFollowRepository;
pub use recipe::DbRecipeRepository;
pub use user::DbUserRepository;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
