//! Lifecycle state machine: one guard function per transition edge.
//!
//! Each guard is pure: it inspects the actor, the loaded appraisal view,
//! and the submitted data, and either returns the target status or the
//! first failed check as a [`CoreError`]. Checks run in a fixed order —
//! current stage, then access, then data — so a caller in the wrong stage
//! is told the current status rather than a generic denial. Persisting the
//! returned status is the storage layer's job and must be conditional on
//! the status the guard saw (compare-and-swap); a lost race surfaces as
//! `ConcurrentModification` there.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::evaluation::{self, GoalEvaluation, OverallEvaluation};
use crate::ledger;
use crate::policy::{self, Actor, Participants};
use crate::status::{AppraisalStatus, Stage};
use crate::types::DbId;

/// The engine's view of an appraisal row: participants plus current status.
#[derive(Debug, Clone, Copy)]
pub struct AppraisalView {
    pub participants: Participants,
    pub status: AppraisalStatus,
}

/// One goal's submitted rating and comment for a stage.
#[derive(Debug, Clone)]
pub struct GoalRatingEntry {
    pub goal_id: DbId,
    pub rating: i16,
    pub comment: String,
}

/// An overall rating and comment submitted for a stage.
#[derive(Debug, Clone)]
pub struct OverallEntry {
    pub rating: i16,
    pub comment: String,
}

fn ensure_status(view: &AppraisalView, expected: AppraisalStatus) -> Result<(), CoreError> {
    if view.status == expected {
        Ok(())
    } else {
        Err(CoreError::WrongStage {
            current: view.status.display_name(),
        })
    }
}

/// Guard for creating a new appraisal (enters the lifecycle in Draft).
pub fn check_create(
    actor: &Actor,
    appraisee_id: DbId,
    appraiser_id: DbId,
    reviewer_id: DbId,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<(), CoreError> {
    if !policy::can_create_appraisal(actor) {
        return Err(CoreError::Forbidden);
    }
    if period_end < period_start {
        return Err(CoreError::InvalidDateRange);
    }
    if reviewer_id == appraisee_id {
        return Err(CoreError::InvalidReviewer(
            "reviewer must differ from the appraisee".into(),
        ));
    }
    if reviewer_id == appraiser_id {
        return Err(CoreError::InvalidReviewer(
            "reviewer must differ from the appraiser".into(),
        ));
    }
    Ok(())
}

/// Guard for adding, updating, or removing goals (Draft only, appraiser
/// only). Weightage bounds are validated separately per goal.
pub fn check_edit_goals(actor: &Actor, view: &AppraisalView) -> Result<(), CoreError> {
    ensure_status(view, AppraisalStatus::Draft)?;
    if !policy::can_edit_draft(actor, &view.participants, view.status) {
        return Err(CoreError::Forbidden);
    }
    Ok(())
}

/// Guard for deleting an appraisal. Deletion is only permitted while the
/// appraisal is still in Draft, by the appraiser.
pub fn check_delete(actor: &Actor, view: &AppraisalView) -> Result<(), CoreError> {
    ensure_status(view, AppraisalStatus::Draft)?;
    if !policy::can_edit_draft(actor, &view.participants, view.status) {
        return Err(CoreError::Forbidden);
    }
    Ok(())
}

/// Guard for Draft → Submitted.
///
/// The appraiser submits; the goal ledger must be complete (weightages
/// total exactly 100 over a non-empty goal set).
pub fn check_submit(
    actor: &Actor,
    view: &AppraisalView,
    weightages: &[i16],
) -> Result<AppraisalStatus, CoreError> {
    ensure_status(view, AppraisalStatus::Draft)?;
    if actor.employee_id != view.participants.appraiser_id {
        return Err(CoreError::Forbidden);
    }
    ledger::validate_complete(weightages)?;
    Ok(AppraisalStatus::Submitted)
}

/// Guard for Submitted → AppraiseeSelfAssessment (the acknowledge step).
pub fn check_acknowledge(
    actor: &Actor,
    view: &AppraisalView,
) -> Result<AppraisalStatus, CoreError> {
    ensure_status(view, AppraisalStatus::Submitted)?;
    if actor.employee_id != view.participants.appraisee_id {
        return Err(CoreError::Forbidden);
    }
    Ok(AppraisalStatus::AppraiseeSelfAssessment)
}

/// Guard for AppraiseeSelfAssessment → AppraiserEvaluation.
///
/// The appraisee must rate and comment every goal of the appraisal.
pub fn check_self_assessment(
    actor: &Actor,
    view: &AppraisalView,
    goal_ids: &[DbId],
    entries: &[GoalRatingEntry],
) -> Result<AppraisalStatus, CoreError> {
    ensure_status(view, AppraisalStatus::AppraiseeSelfAssessment)?;
    if !policy::can_act_in_stage(actor, &view.participants, Stage::SelfAssessment) {
        return Err(CoreError::Forbidden);
    }
    validate_goal_entries(goal_ids, entries)?;
    Ok(AppraisalStatus::AppraiserEvaluation)
}

/// Guard for AppraiserEvaluation → ReviewerEvaluation.
///
/// Per-goal ratings/comments plus the appraiser's overall rating and
/// comment are all required.
pub fn check_appraiser_evaluation(
    actor: &Actor,
    view: &AppraisalView,
    goal_ids: &[DbId],
    entries: &[GoalRatingEntry],
    overall: &OverallEntry,
) -> Result<AppraisalStatus, CoreError> {
    ensure_status(view, AppraisalStatus::AppraiserEvaluation)?;
    if !policy::can_act_in_stage(actor, &view.participants, Stage::AppraiserEvaluation) {
        return Err(CoreError::Forbidden);
    }
    validate_goal_entries(goal_ids, entries)?;
    validate_overall_entry(overall)?;
    Ok(AppraisalStatus::ReviewerEvaluation)
}

/// Guard for ReviewerEvaluation → Complete.
///
/// The reviewer rates only overall; per-goal fields are not touched.
pub fn check_reviewer_evaluation(
    actor: &Actor,
    view: &AppraisalView,
    overall: &OverallEntry,
) -> Result<AppraisalStatus, CoreError> {
    ensure_status(view, AppraisalStatus::ReviewerEvaluation)?;
    if !policy::can_act_in_stage(actor, &view.participants, Stage::ReviewerEvaluation) {
        return Err(CoreError::Forbidden);
    }
    validate_overall_entry(overall)?;
    Ok(AppraisalStatus::Complete)
}

/// Validate that a set of per-goal entries covers the appraisal's goals
/// exactly: every rating in range, every comment non-empty, every goal
/// covered, and no entry pointing at a foreign goal.
fn validate_goal_entries(goal_ids: &[DbId], entries: &[GoalRatingEntry]) -> Result<(), CoreError> {
    for entry in entries {
        evaluation::validate_rating(entry.rating)?;
        if entry.comment.trim().is_empty() {
            return Err(CoreError::IncompleteStage(format!(
                "missing comment for goal {}",
                entry.goal_id
            )));
        }
        if !goal_ids.contains(&entry.goal_id) {
            return Err(CoreError::Validation(format!(
                "goal {} does not belong to this appraisal",
                entry.goal_id
            )));
        }
    }
    for &goal_id in goal_ids {
        if !entries.iter().any(|e| e.goal_id == goal_id) {
            return Err(CoreError::IncompleteStage(format!(
                "missing rating for goal {goal_id}"
            )));
        }
    }
    Ok(())
}

fn validate_overall_entry(overall: &OverallEntry) -> Result<(), CoreError> {
    evaluation::validate_rating(overall.rating)?;
    if overall.comment.trim().is_empty() {
        return Err(CoreError::IncompleteStage(
            "missing overall comment".into(),
        ));
    }
    Ok(())
}

/// Completeness view of a stage over already-persisted data, exposed for
/// read-side display. Never re-validates past stages on fetch.
pub fn is_stage_complete(
    goals: &[GoalEvaluation],
    overall: &OverallEvaluation,
    stage: Stage,
) -> bool {
    evaluation::is_stage_complete(goals, overall, stage)
}
