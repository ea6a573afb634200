//! Ambient plumbing shared by Foodgram binaries: tracing setup, health
//! handlers, request-id middleware and sea-orm query helpers.

pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod tracing;
