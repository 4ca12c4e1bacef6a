//! Domain logic for the appraisal lifecycle engine.
//!
//! Everything in this crate is pure and synchronous: status definitions,
//! access policy predicates, weightage bookkeeping, evaluation completeness
//! checks, and the per-transition guard functions. Persistence and HTTP
//! concerns live in `appraise-db` and `appraise-api`.

pub mod error;
pub mod evaluation;
pub mod ledger;
pub mod lifecycle;
pub mod policy;
pub mod status;
pub mod types;
