//! Appraisal models and request bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use appraise_core::error::CoreError;
use appraise_core::evaluation::OverallEvaluation;
use appraise_core::lifecycle::AppraisalView;
use appraise_core::policy::Participants;
use appraise_core::status::AppraisalStatus;
use appraise_core::types::{DbId, Timestamp};

/// A row from the `appraisals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appraisal {
    pub id: DbId,
    pub appraisee_id: DbId,
    pub appraiser_id: DbId,
    pub reviewer_id: DbId,
    pub type_id: DbId,
    pub type_range_id: Option<DbId>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status_id: i16,
    pub appraiser_overall_rating: Option<i16>,
    pub appraiser_overall_comment: Option<String>,
    pub reviewer_overall_rating: Option<i16>,
    pub reviewer_overall_comment: Option<String>,
    pub acknowledged_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appraisal {
    /// Decode the stored status id, rejecting unknown values.
    pub fn status(&self) -> Result<AppraisalStatus, CoreError> {
        AppraisalStatus::try_from_id(self.status_id)
    }

    /// The three participant ids.
    pub fn participants(&self) -> Participants {
        Participants {
            appraisee_id: self.appraisee_id,
            appraiser_id: self.appraiser_id,
            reviewer_id: self.reviewer_id,
        }
    }

    /// The engine's view of this row (participants + decoded status).
    pub fn view(&self) -> Result<AppraisalView, CoreError> {
        Ok(AppraisalView {
            participants: self.participants(),
            status: self.status()?,
        })
    }

    /// The appraiser's overall evaluation fields.
    pub fn appraiser_overall(&self) -> OverallEvaluation {
        OverallEvaluation {
            rating: self.appraiser_overall_rating,
            comment: self.appraiser_overall_comment.clone(),
        }
    }

    /// The reviewer's overall evaluation fields.
    pub fn reviewer_overall(&self) -> OverallEvaluation {
        OverallEvaluation {
            rating: self.reviewer_overall_rating,
            comment: self.reviewer_overall_comment.clone(),
        }
    }
}

/// Request body for creating an appraisal. The created row always starts
/// in Draft.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppraisalRequest {
    pub appraisee_id: DbId,
    pub appraiser_id: DbId,
    pub reviewer_id: DbId,
    pub type_id: DbId,
    pub type_range_id: Option<DbId>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}
