//! Domain types shared across the Foodgram crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers and in the auth extractors.

pub mod id;
pub mod pagination;
