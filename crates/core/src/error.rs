use crate::types::DbId;

/// Domain error taxonomy for the appraisal lifecycle engine.
///
/// Every guard failure surfaces as one of these variants; nothing in the
/// engine panics or swallows a failed check. The API layer maps each
/// variant to an HTTP status and a stable machine-readable code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The caller presented no valid identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The actor lacks the role or relationship required for the action.
    #[error("Access denied.")]
    Forbidden,

    /// The action is not available while the appraisal is in its current
    /// status. The message always names that status.
    #[error("Action not allowed while the appraisal is in '{current}'")]
    WrongStage { current: &'static str },

    /// Goal weightages do not sum to exactly 100, or the goal set is empty.
    #[error("Goal weightages must total exactly 100, currently {total}")]
    IncompleteWeightage { total: i32 },

    /// An individual goal's weightage falls outside [1, 100].
    #[error("Goal weightage must be between 1 and 100, got {weightage}")]
    InvalidGoalWeightage { weightage: i16 },

    /// A submitted rating falls outside [1, 5].
    #[error("Rating must be between 1 and 5, got {rating}")]
    RatingOutOfRange { rating: i16 },

    /// Required rating/comment fields are missing for the stage being
    /// submitted.
    #[error("Stage submission incomplete: {0}")]
    IncompleteStage(String),

    /// The reviewer coincides with the appraisee or the appraiser.
    #[error("Invalid reviewer: {0}")]
    InvalidReviewer(String),

    #[error("Appraisal period end date must not precede the start date")]
    InvalidDateRange,

    /// The expected-status precondition failed at commit time: another
    /// actor advanced the appraisal first. Re-fetch and retry explicitly.
    #[error("The appraisal was modified concurrently; please re-fetch and retry")]
    ConcurrentModification,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
