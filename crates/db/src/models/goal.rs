//! Goal models and request bodies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use appraise_core::evaluation::GoalEvaluation;
use appraise_core::types::{DbId, Timestamp};

/// A row from the `goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub id: DbId,
    pub appraisal_id: DbId,
    pub title: String,
    pub description: String,
    pub category_id: Option<DbId>,
    pub performance_factor: String,
    pub importance: String,
    pub weightage: i16,
    pub template_id: Option<DbId>,
    pub self_rating: Option<i16>,
    pub self_comment: Option<String>,
    pub appraiser_rating: Option<i16>,
    pub appraiser_comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Goal {
    /// The evaluation fields of this goal as the engine views them.
    pub fn evaluation(&self) -> GoalEvaluation {
        GoalEvaluation {
            goal_id: self.id,
            self_rating: self.self_rating,
            self_comment: self.self_comment.clone(),
            appraiser_rating: self.appraiser_rating,
            appraiser_comment: self.appraiser_comment.clone(),
        }
    }
}

/// Request body for adding a goal to a Draft appraisal.
///
/// Weightage bounds are enforced by the core ledger; `validator` covers
/// the basic request shape.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub performance_factor: String,
    #[serde(default)]
    pub importance: String,
    pub weightage: i16,
    pub template_id: Option<DbId>,
}

/// Request body for updating a goal (full replace of the editable fields).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub performance_factor: String,
    #[serde(default)]
    pub importance: String,
    pub weightage: i16,
}
