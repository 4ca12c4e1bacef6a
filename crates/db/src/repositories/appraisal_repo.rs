//! Repository for the `appraisals` table.
//!
//! Every status write is conditional on the expected current status
//! (`WHERE status_id = $expected`) and returns the committed row via
//! `RETURNING`. A method returning `None` means zero rows matched: another
//! actor advanced the appraisal first, which the caller reports as
//! `ConcurrentModification`. Stage submissions update goal rows and the
//! status inside one transaction so either everything commits or nothing
//! does; the Draft -> Submitted edge additionally locks the appraisal row
//! and re-checks the weightage total under that lock, so a goal write
//! racing the submit cannot produce a submitted appraisal whose
//! weightages no longer total 100.

use sqlx::PgPool;

use appraise_core::ledger;
use appraise_core::lifecycle::{GoalRatingEntry, OverallEntry};
use appraise_core::status::AppraisalStatus;
use appraise_core::types::DbId;

use crate::models::appraisal::{Appraisal, CreateAppraisalRequest};

/// Column list for `appraisals` queries.
const COLUMNS: &str = "\
    id, appraisee_id, appraiser_id, reviewer_id, type_id, type_range_id, \
    period_start, period_end, status_id, \
    appraiser_overall_rating, appraiser_overall_comment, \
    reviewer_overall_rating, reviewer_overall_comment, \
    acknowledged_at, created_at, updated_at";

/// Provides persistence for appraisals and their lifecycle transitions.
pub struct AppraisalRepo;

impl AppraisalRepo {
    /// Insert a new appraisal in Draft, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppraisalRequest,
    ) -> Result<Appraisal, sqlx::Error> {
        let query = format!(
            "INSERT INTO appraisals
                (appraisee_id, appraiser_id, reviewer_id, type_id, type_range_id,
                 period_start, period_end, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appraisal>(&query)
            .bind(input.appraisee_id)
            .bind(input.appraiser_id)
            .bind(input.reviewer_id)
            .bind(input.type_id)
            .bind(input.type_range_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(AppraisalStatus::Draft.id())
            .fetch_one(pool)
            .await
    }

    /// Find an appraisal by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appraisal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appraisals WHERE id = $1");
        sqlx::query_as::<_, Appraisal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all appraisals in which the employee participates, newest first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<Appraisal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appraisals
             WHERE appraisee_id = $1 OR appraiser_id = $1 OR reviewer_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Appraisal>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// The Draft -> Submitted edge.
    ///
    /// Locks the appraisal row, re-checks under that lock that it is still
    /// in Draft and that the goal weightages still total 100, then advances
    /// the status. Goal writes take the same lock, so the weightage total
    /// read here cannot be invalidated by a goal committing mid-submit.
    /// Returns `None` if either re-check fails (lost race).
    pub async fn submit_draft(pool: &PgPool, id: DbId) -> Result<Option<Appraisal>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let status: Option<i16> =
            sqlx::query_scalar("SELECT status_id FROM appraisals WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if status != Some(AppraisalStatus::Draft.id()) {
            tx.rollback().await?;
            return Ok(None);
        }

        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(weightage), 0) FROM goals WHERE appraisal_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if total != i64::from(ledger::REQUIRED_TOTAL_WEIGHTAGE) {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "UPDATE appraisals SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let appraisal = sqlx::query_as::<_, Appraisal>(&query)
            .bind(id)
            .bind(AppraisalStatus::Submitted.id())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(appraisal))
    }

    /// The acknowledge edge: Submitted -> AppraiseeSelfAssessment, stamping
    /// `acknowledged_at`. Returns the committed row, or `None` on a lost
    /// race.
    pub async fn acknowledge(pool: &PgPool, id: DbId) -> Result<Option<Appraisal>, sqlx::Error> {
        let query = format!(
            "UPDATE appraisals
             SET status_id = $3, acknowledged_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appraisal>(&query)
            .bind(id)
            .bind(AppraisalStatus::Submitted.id())
            .bind(AppraisalStatus::AppraiseeSelfAssessment.id())
            .fetch_optional(pool)
            .await
    }

    /// Persist the appraisee's self-assessment and advance to
    /// AppraiserEvaluation, atomically. Returns the committed row, or
    /// `None` if the status CAS lost the race (goal writes roll back).
    pub async fn submit_self_assessment(
        pool: &PgPool,
        id: DbId,
        entries: &[GoalRatingEntry],
    ) -> Result<Option<Appraisal>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for entry in entries {
            sqlx::query(
                "UPDATE goals SET self_rating = $3, self_comment = $4, updated_at = NOW()
                 WHERE id = $1 AND appraisal_id = $2",
            )
            .bind(entry.goal_id)
            .bind(id)
            .bind(entry.rating)
            .bind(&entry.comment)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE appraisals SET status_id = $3, updated_at = NOW()
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        let appraisal = sqlx::query_as::<_, Appraisal>(&query)
            .bind(id)
            .bind(AppraisalStatus::AppraiseeSelfAssessment.id())
            .bind(AppraisalStatus::AppraiserEvaluation.id())
            .fetch_optional(&mut *tx)
            .await?;

        match appraisal {
            Some(appraisal) => {
                tx.commit().await?;
                Ok(Some(appraisal))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Persist the appraiser's per-goal and overall evaluation and advance
    /// to ReviewerEvaluation, atomically. Returns the committed row, or
    /// `None` if the status CAS lost the race (goal writes roll back).
    pub async fn submit_appraiser_evaluation(
        pool: &PgPool,
        id: DbId,
        entries: &[GoalRatingEntry],
        overall: &OverallEntry,
    ) -> Result<Option<Appraisal>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for entry in entries {
            sqlx::query(
                "UPDATE goals SET appraiser_rating = $3, appraiser_comment = $4, updated_at = NOW()
                 WHERE id = $1 AND appraisal_id = $2",
            )
            .bind(entry.goal_id)
            .bind(id)
            .bind(entry.rating)
            .bind(&entry.comment)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE appraisals
             SET appraiser_overall_rating = $4, appraiser_overall_comment = $5,
                 status_id = $3, updated_at = NOW()
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        let appraisal = sqlx::query_as::<_, Appraisal>(&query)
            .bind(id)
            .bind(AppraisalStatus::AppraiserEvaluation.id())
            .bind(AppraisalStatus::ReviewerEvaluation.id())
            .bind(overall.rating)
            .bind(&overall.comment)
            .fetch_optional(&mut *tx)
            .await?;

        match appraisal {
            Some(appraisal) => {
                tx.commit().await?;
                Ok(Some(appraisal))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Persist the reviewer's overall evaluation and complete the
    /// appraisal. Returns the committed row, or `None` on a lost race.
    pub async fn submit_reviewer_evaluation(
        pool: &PgPool,
        id: DbId,
        overall: &OverallEntry,
    ) -> Result<Option<Appraisal>, sqlx::Error> {
        let query = format!(
            "UPDATE appraisals
             SET reviewer_overall_rating = $4, reviewer_overall_comment = $5,
                 status_id = $3, updated_at = NOW()
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appraisal>(&query)
            .bind(id)
            .bind(AppraisalStatus::ReviewerEvaluation.id())
            .bind(AppraisalStatus::Complete.id())
            .bind(overall.rating)
            .bind(&overall.comment)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a Draft appraisal; goals cascade. Returns `false` if the
    /// row was missing or no longer in Draft.
    pub async fn delete_draft(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appraisals WHERE id = $1 AND status_id = $2")
            .bind(id)
            .bind(AppraisalStatus::Draft.id())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
