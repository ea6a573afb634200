pub mod auth;
pub mod catalog;
pub mod collection;
pub mod follow;
pub mod recipe;
pub mod seed;
pub mod shopping_list;
pub mod user;
