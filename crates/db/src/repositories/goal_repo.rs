//! Repository for the `goals` table.
//!
//! Goal writes happen only while the owning appraisal is in Draft. Each
//! write locks the appraisal row (`SELECT ... FOR UPDATE`) and re-checks
//! the status under that lock, so a goal mutation serializes against the
//! Draft -> Submitted transition and cannot land on an appraisal that has
//! already been submitted. Evaluation fields are written by
//! `AppraisalRepo` inside the stage-submission transactions.

use sqlx::{PgPool, Postgres, Transaction};

use appraise_core::status::AppraisalStatus;
use appraise_core::types::DbId;

use crate::models::goal::{CreateGoalRequest, Goal, UpdateGoalRequest};

/// Column list for `goals` queries.
const COLUMNS: &str = "\
    id, appraisal_id, title, description, category_id, performance_factor, \
    importance, weightage, template_id, \
    self_rating, self_comment, appraiser_rating, appraiser_comment, \
    created_at, updated_at";

/// Outcome of a goal write gated on the owning appraisal still being in
/// Draft at commit time.
#[derive(Debug)]
pub enum DraftWrite<T> {
    /// The write committed.
    Applied(T),
    /// The appraisal, or the goal under it, does not exist.
    Missing,
    /// The appraisal left Draft between the caller's guard and the write.
    StageChanged,
}

/// Lock the appraisal row and report whether it is still in Draft.
/// `None` means the row does not exist.
async fn lock_draft(
    tx: &mut Transaction<'_, Postgres>,
    appraisal_id: DbId,
) -> Result<Option<bool>, sqlx::Error> {
    let status: Option<i16> =
        sqlx::query_scalar("SELECT status_id FROM appraisals WHERE id = $1 FOR UPDATE")
            .bind(appraisal_id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(status.map(|s| s == AppraisalStatus::Draft.id()))
}

/// Provides CRUD operations for goals.
pub struct GoalRepo;

impl GoalRepo {
    /// Insert a new goal for a Draft appraisal.
    pub async fn create(
        pool: &PgPool,
        appraisal_id: DbId,
        input: &CreateGoalRequest,
    ) -> Result<DraftWrite<Goal>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        match lock_draft(&mut tx, appraisal_id).await? {
            None => {
                tx.rollback().await?;
                return Ok(DraftWrite::Missing);
            }
            Some(false) => {
                tx.rollback().await?;
                return Ok(DraftWrite::StageChanged);
            }
            Some(true) => {}
        }

        let query = format!(
            "INSERT INTO goals
                (appraisal_id, title, description, category_id, performance_factor,
                 importance, weightage, template_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let goal = sqlx::query_as::<_, Goal>(&query)
            .bind(appraisal_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.performance_factor)
            .bind(&input.importance)
            .bind(input.weightage)
            .bind(input.template_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(DraftWrite::Applied(goal))
    }

    /// Find a goal by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all goals of an appraisal in creation order.
    pub async fn list_for_appraisal(
        pool: &PgPool,
        appraisal_id: DbId,
    ) -> Result<Vec<Goal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM goals WHERE appraisal_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(appraisal_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the editable fields of a goal under a Draft appraisal.
    pub async fn update(
        pool: &PgPool,
        appraisal_id: DbId,
        goal_id: DbId,
        input: &UpdateGoalRequest,
    ) -> Result<DraftWrite<Goal>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        match lock_draft(&mut tx, appraisal_id).await? {
            None => {
                tx.rollback().await?;
                return Ok(DraftWrite::Missing);
            }
            Some(false) => {
                tx.rollback().await?;
                return Ok(DraftWrite::StageChanged);
            }
            Some(true) => {}
        }

        let query = format!(
            "UPDATE goals
             SET title = $3, description = $4, category_id = $5,
                 performance_factor = $6, importance = $7, weightage = $8,
                 updated_at = NOW()
             WHERE id = $1 AND appraisal_id = $2
             RETURNING {COLUMNS}"
        );
        let goal = sqlx::query_as::<_, Goal>(&query)
            .bind(goal_id)
            .bind(appraisal_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.performance_factor)
            .bind(&input.importance)
            .bind(input.weightage)
            .fetch_optional(&mut *tx)
            .await?;

        match goal {
            Some(goal) => {
                tx.commit().await?;
                Ok(DraftWrite::Applied(goal))
            }
            None => {
                tx.rollback().await?;
                Ok(DraftWrite::Missing)
            }
        }
    }

    /// Delete a goal from a Draft appraisal.
    pub async fn delete(
        pool: &PgPool,
        appraisal_id: DbId,
        goal_id: DbId,
    ) -> Result<DraftWrite<()>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        match lock_draft(&mut tx, appraisal_id).await? {
            None => {
                tx.rollback().await?;
                return Ok(DraftWrite::Missing);
            }
            Some(false) => {
                tx.rollback().await?;
                return Ok(DraftWrite::StageChanged);
            }
            Some(true) => {}
        }

        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND appraisal_id = $2")
            .bind(goal_id)
            .bind(appraisal_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(DraftWrite::Missing);
        }
        tx.commit().await?;
        Ok(DraftWrite::Applied(()))
    }
}
