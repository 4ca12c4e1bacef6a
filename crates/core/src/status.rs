//! Appraisal lifecycle statuses mapping to the `appraisal_statuses` lookup
//! table.
//!
//! The enum discriminants match the seed data order (1-based) in the
//! database; `try_from_id` is the single place an out-of-range id can enter
//! the domain and it rejects anything outside the known set. The lifecycle
//! is strictly forward-only: each status has at most one successor and
//! `Complete` is the sole terminal state.

use serde::Serialize;

use crate::error::CoreError;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Appraisal lifecycle status.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AppraisalStatus {
    Draft = 1,
    Submitted = 2,
    AppraiseeSelfAssessment = 3,
    AppraiserEvaluation = 4,
    ReviewerEvaluation = 5,
    Complete = 6,
}

impl AppraisalStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Convert a raw database id into a status, rejecting unknown values.
    pub fn try_from_id(id: StatusId) -> Result<Self, CoreError> {
        match id {
            1 => Ok(Self::Draft),
            2 => Ok(Self::Submitted),
            3 => Ok(Self::AppraiseeSelfAssessment),
            4 => Ok(Self::AppraiserEvaluation),
            5 => Ok(Self::ReviewerEvaluation),
            6 => Ok(Self::Complete),
            other => Err(CoreError::Internal(format!(
                "Unknown appraisal status id {other}"
            ))),
        }
    }

    /// Human-readable name used in client-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::AppraiseeSelfAssessment => "Appraisee Self Assessment",
            Self::AppraiserEvaluation => "Appraiser Evaluation",
            Self::ReviewerEvaluation => "Reviewer Evaluation",
            Self::Complete => "Complete",
        }
    }

    /// The next status in the lifecycle, or `None` once complete.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Draft => Some(Self::Submitted),
            Self::Submitted => Some(Self::AppraiseeSelfAssessment),
            Self::AppraiseeSelfAssessment => Some(Self::AppraiserEvaluation),
            Self::AppraiserEvaluation => Some(Self::ReviewerEvaluation),
            Self::ReviewerEvaluation => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Whether this is the terminal status.
    pub fn is_terminal(self) -> bool {
        self == Self::Complete
    }
}

impl From<AppraisalStatus> for StatusId {
    fn from(value: AppraisalStatus) -> Self {
        value as StatusId
    }
}

/// A lifecycle phase that accepts input from exactly one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelfAssessment,
    AppraiserEvaluation,
    ReviewerEvaluation,
}

impl Stage {
    /// The status during which this stage accepts submissions.
    pub fn required_status(self) -> AppraisalStatus {
        match self {
            Self::SelfAssessment => AppraisalStatus::AppraiseeSelfAssessment,
            Self::AppraiserEvaluation => AppraisalStatus::AppraiserEvaluation,
            Self::ReviewerEvaluation => AppraisalStatus::ReviewerEvaluation,
        }
    }
}
