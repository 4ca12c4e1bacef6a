//! Goal Ledger: weightage bookkeeping for an appraisal's goal set.
//!
//! An appraisal may only leave Draft once its goal weightages sum to
//! exactly 100. Individual weightages are integer percentages in [1, 100],
//! enforced both here and at goal create/update time.

use crate::error::CoreError;

/// Goal weightages across one appraisal must total exactly this.
pub const REQUIRED_TOTAL_WEIGHTAGE: i32 = 100;

/// Minimum weightage for a single goal.
pub const MIN_GOAL_WEIGHTAGE: i16 = 1;

/// Maximum weightage for a single goal.
pub const MAX_GOAL_WEIGHTAGE: i16 = 100;

/// Sum the weightages of a goal set. No side effects.
pub fn total_weightage(weightages: &[i16]) -> i32 {
    weightages.iter().map(|&w| i32::from(w)).sum()
}

/// Validate a single goal's weightage bound, used at create/update time.
pub fn validate_goal_weightage(weightage: i16) -> Result<(), CoreError> {
    if (MIN_GOAL_WEIGHTAGE..=MAX_GOAL_WEIGHTAGE).contains(&weightage) {
        Ok(())
    } else {
        Err(CoreError::InvalidGoalWeightage { weightage })
    }
}

/// Validate that a goal set is ready for submission.
///
/// Fails with `InvalidGoalWeightage` if any weightage is out of bounds and
/// with `IncompleteWeightage` unless the total equals exactly 100. An empty
/// goal set always fails: an appraisal cannot be submitted with 0% total.
pub fn validate_complete(weightages: &[i16]) -> Result<(), CoreError> {
    if weightages.is_empty() {
        return Err(CoreError::IncompleteWeightage { total: 0 });
    }
    for &weightage in weightages {
        validate_goal_weightage(weightage)?;
    }
    let total = total_weightage(weightages);
    if total != REQUIRED_TOTAL_WEIGHTAGE {
        return Err(CoreError::IncompleteWeightage { total });
    }
    Ok(())
}
