//! Read-only repository for reference data (appraisal types, type ranges,
//! goal categories).

use sqlx::PgPool;

use appraise_core::types::DbId;

use crate::models::reference::{AppraisalType, AppraisalTypeRange, GoalCategory};

/// Provides read operations for reference tables.
pub struct ReferenceRepo;

impl ReferenceRepo {
    /// List all appraisal types, ordered by name.
    pub async fn list_types(pool: &PgPool) -> Result<Vec<AppraisalType>, sqlx::Error> {
        sqlx::query_as::<_, AppraisalType>(
            "SELECT id, name, description, created_at, updated_at
             FROM appraisal_types ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find an appraisal type by its ID.
    pub async fn find_type_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AppraisalType>, sqlx::Error> {
        sqlx::query_as::<_, AppraisalType>(
            "SELECT id, name, description, created_at, updated_at
             FROM appraisal_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a type range by its ID.
    pub async fn find_range_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AppraisalTypeRange>, sqlx::Error> {
        sqlx::query_as::<_, AppraisalTypeRange>(
            "SELECT id, type_id, name, created_at, updated_at
             FROM appraisal_type_ranges WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List all goal categories, ordered by name.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<GoalCategory>, sqlx::Error> {
        sqlx::query_as::<_, GoalCategory>(
            "SELECT id, name, created_at, updated_at
             FROM goal_categories ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a goal category by its ID.
    pub async fn find_category_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GoalCategory>, sqlx::Error> {
        sqlx::query_as::<_, GoalCategory>(
            "SELECT id, name, created_at, updated_at
             FROM goal_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
