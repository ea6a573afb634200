pub mod auth;
pub mod catalog;
pub mod collection;
pub mod dto;
pub mod follow;
pub mod pagination;
pub mod recipe;
pub mod user;
