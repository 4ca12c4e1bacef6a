//! Handlers for the three stage-submission endpoints.
//!
//! Each follows the same shape: load the aggregate, run the pure guard,
//! then persist through a compare-and-swap write. A guard that passed on
//! the loaded snapshot but a write that matched zero rows means another
//! actor advanced the appraisal in between; that surfaces as
//! `ConcurrentModification`, never as a silent overwrite.

use axum::extract::{Path, State};
use axum::Json;

use appraise_core::error::CoreError;
use appraise_core::lifecycle::{self, GoalRatingEntry, OverallEntry};
use appraise_core::types::DbId;
use appraise_db::models::appraisal::Appraisal;
use appraise_db::models::evaluation::{
    AppraiserEvaluationRequest, ReviewerEvaluationRequest, SelfAssessmentRequest,
};
use appraise_db::repositories::{AppraisalRepo, GoalRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::appraisal::load_appraisal;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/appraisals/{appraisal_id}/self-assessment
///
/// The appraisee rates and comments every goal; on success the appraisal
/// advances to Appraiser Evaluation.
pub async fn submit_self_assessment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
    Json(input): Json<SelfAssessmentRequest>,
) -> AppResult<Json<DataResponse<Appraisal>>> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    let goals = GoalRepo::list_for_appraisal(&state.pool, appraisal_id).await?;
    let goal_ids: Vec<DbId> = goals.iter().map(|g| g.id).collect();
    let entries: Vec<GoalRatingEntry> = input.goals.into_iter().map(Into::into).collect();

    lifecycle::check_self_assessment(&auth.actor(), &appraisal.view()?, &goal_ids, &entries)?;

    let updated = AppraisalRepo::submit_self_assessment(&state.pool, appraisal_id, &entries)
        .await?
        .ok_or(AppError::Core(CoreError::ConcurrentModification))?;

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        goals = entries.len(),
        "Self-assessment submitted"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/appraisals/{appraisal_id}/appraiser-evaluation
///
/// The appraiser rates and comments every goal plus the overall pair; on
/// success the appraisal advances to Reviewer Evaluation.
pub async fn submit_appraiser_evaluation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
    Json(input): Json<AppraiserEvaluationRequest>,
) -> AppResult<Json<DataResponse<Appraisal>>> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    let goals = GoalRepo::list_for_appraisal(&state.pool, appraisal_id).await?;
    let goal_ids: Vec<DbId> = goals.iter().map(|g| g.id).collect();
    let entries: Vec<GoalRatingEntry> = input.goals.into_iter().map(Into::into).collect();
    let overall: OverallEntry = input.overall.into();

    lifecycle::check_appraiser_evaluation(
        &auth.actor(),
        &appraisal.view()?,
        &goal_ids,
        &entries,
        &overall,
    )?;

    let updated =
        AppraisalRepo::submit_appraiser_evaluation(&state.pool, appraisal_id, &entries, &overall)
            .await?
            .ok_or(AppError::Core(CoreError::ConcurrentModification))?;

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        goals = entries.len(),
        overall_rating = overall.rating,
        "Appraiser evaluation submitted"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/appraisals/{appraisal_id}/reviewer-evaluation
///
/// The reviewer submits the overall rating and comment; on success the
/// appraisal is Complete.
pub async fn submit_reviewer_evaluation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
    Json(input): Json<ReviewerEvaluationRequest>,
) -> AppResult<Json<DataResponse<Appraisal>>> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    let overall: OverallEntry = input.overall.into();

    lifecycle::check_reviewer_evaluation(&auth.actor(), &appraisal.view()?, &overall)?;

    let updated = AppraisalRepo::submit_reviewer_evaluation(&state.pool, appraisal_id, &overall)
        .await?
        .ok_or(AppError::Core(CoreError::ConcurrentModification))?;

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        overall_rating = overall.rating,
        "Reviewer evaluation submitted; appraisal complete"
    );

    Ok(Json(DataResponse { data: updated }))
}
