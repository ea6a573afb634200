//! Test utilities for Foodgram crates.
//!
//! Import in `#[cfg(test)]` blocks and integration tests only, never in
//! production code.

pub mod auth;
