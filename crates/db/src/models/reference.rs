//! Reference data models: appraisal types, type ranges, goal categories.

use serde::Serialize;
use sqlx::FromRow;

use appraise_core::types::{DbId, Timestamp};

/// A row from the `appraisal_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppraisalType {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `appraisal_type_ranges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppraisalTypeRange {
    pub id: DbId,
    pub type_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `goal_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GoalCategory {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
