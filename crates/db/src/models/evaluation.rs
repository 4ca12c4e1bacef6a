//! Request bodies for the stage-submission endpoints.

use serde::Deserialize;

use appraise_core::lifecycle::{GoalRatingEntry, OverallEntry};
use appraise_core::types::DbId;

/// One goal's submitted rating and comment.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalRatingInput {
    pub goal_id: DbId,
    pub rating: i16,
    pub comment: String,
}

impl From<GoalRatingInput> for GoalRatingEntry {
    fn from(input: GoalRatingInput) -> Self {
        GoalRatingEntry {
            goal_id: input.goal_id,
            rating: input.rating,
            comment: input.comment,
        }
    }
}

/// An overall rating/comment pair for a stage.
#[derive(Debug, Clone, Deserialize)]
pub struct OverallInput {
    pub rating: i16,
    pub comment: String,
}

impl From<OverallInput> for OverallEntry {
    fn from(input: OverallInput) -> Self {
        OverallEntry {
            rating: input.rating,
            comment: input.comment,
        }
    }
}

/// Request body for submitting the appraisee's self-assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct SelfAssessmentRequest {
    pub goals: Vec<GoalRatingInput>,
}

/// Request body for submitting the appraiser's evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppraiserEvaluationRequest {
    pub goals: Vec<GoalRatingInput>,
    pub overall: OverallInput,
}

/// Request body for submitting the reviewer's overall evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewerEvaluationRequest {
    pub overall: OverallInput,
}
