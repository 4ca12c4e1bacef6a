//! Evaluation Record: per-goal and overall rating/comment rules.
//!
//! Ratings are integer scores in [1, 5]. The range check lives here and is
//! applied independently of the access checks, so an out-of-range value is
//! rejected even if a caller skipped the policy layer.

use crate::error::CoreError;
use crate::status::Stage;
use crate::types::DbId;

/// Minimum valid rating.
pub const MIN_RATING: i16 = 1;

/// Maximum valid rating.
pub const MAX_RATING: i16 = 5;

/// Validate that a rating is within [1, 5].
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::RatingOutOfRange { rating })
    }
}

/// The evaluation fields stored on one goal row.
#[derive(Debug, Clone, Default)]
pub struct GoalEvaluation {
    pub goal_id: DbId,
    pub self_rating: Option<i16>,
    pub self_comment: Option<String>,
    pub appraiser_rating: Option<i16>,
    pub appraiser_comment: Option<String>,
}

/// An overall rating/comment pair as stored on the appraisal row.
#[derive(Debug, Clone, Default)]
pub struct OverallEvaluation {
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

/// Whether a rating/comment pair counts as filled in.
fn is_filled(rating: Option<i16>, comment: Option<&str>) -> bool {
    matches!(rating, Some(r) if (MIN_RATING..=MAX_RATING).contains(&r))
        && comment.is_some_and(|c| !c.trim().is_empty())
}

/// Whether every field required by a stage is populated.
///
/// Per-goal fields must be filled for the self and appraiser stages; the
/// appraiser and reviewer stages additionally require the corresponding
/// overall rating and comment. The reviewer rates only overall.
pub fn is_stage_complete(
    goals: &[GoalEvaluation],
    overall: &OverallEvaluation,
    stage: Stage,
) -> bool {
    match stage {
        Stage::SelfAssessment => goals
            .iter()
            .all(|g| is_filled(g.self_rating, g.self_comment.as_deref())),
        Stage::AppraiserEvaluation => {
            goals
                .iter()
                .all(|g| is_filled(g.appraiser_rating, g.appraiser_comment.as_deref()))
                && is_filled(overall.rating, overall.comment.as_deref())
        }
        Stage::ReviewerEvaluation => is_filled(overall.rating, overall.comment.as_deref()),
    }
}
