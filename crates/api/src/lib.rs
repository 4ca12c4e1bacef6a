//! HTTP layer for the appraisal backend.
//!
//! Thin axum handlers over the `appraise-core` guards and `appraise-db`
//! repositories: extract the actor from the JWT, load the aggregate, run
//! the core guard, persist through a compare-and-swap write.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
