//! Handlers for goals within a Draft appraisal.
//!
//! All three operations share the same gate: the appraisal must still be
//! in Draft and the actor must be its appraiser. Weightage bounds are
//! enforced per goal here; the sum-to-100 invariant is checked at submit.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use appraise_core::error::CoreError;
use appraise_core::ledger;
use appraise_core::lifecycle;
use appraise_core::types::DbId;
use appraise_db::models::goal::{CreateGoalRequest, Goal, UpdateGoalRequest};
use appraise_db::repositories::{DraftWrite, GoalRepo, ReferenceRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::appraisal::load_appraisal;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_category_exists(state: &AppState, category_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = category_id {
        ReferenceRepo::find_category_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "GoalCategory",
                id,
            }))?;
    }
    Ok(())
}

/// POST /api/v1/appraisals/{appraisal_id}/goals
///
/// Add a goal to a Draft appraisal.
pub async fn add_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
    Json(input): Json<CreateGoalRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    lifecycle::check_edit_goals(&auth.actor(), &appraisal.view()?)?;
    ledger::validate_goal_weightage(input.weightage)?;
    ensure_category_exists(&state, input.category_id).await?;

    // The repo takes the appraisal row lock and re-checks Draft under it;
    // a raced submit surfaces here instead of landing a goal on a
    // submitted appraisal.
    let goal = match GoalRepo::create(&state.pool, appraisal_id, &input).await? {
        DraftWrite::Applied(goal) => goal,
        DraftWrite::Missing => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Appraisal",
                id: appraisal_id,
            }))
        }
        DraftWrite::StageChanged => return Err(AppError::Core(CoreError::ConcurrentModification)),
    };

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        goal_id = goal.id,
        weightage = goal.weightage,
        "Goal added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: goal })))
}

/// PUT /api/v1/appraisals/{appraisal_id}/goals/{goal_id}
///
/// Replace a goal's editable fields, including its weightage.
pub async fn update_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((appraisal_id, goal_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateGoalRequest>,
) -> AppResult<Json<DataResponse<Goal>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    lifecycle::check_edit_goals(&auth.actor(), &appraisal.view()?)?;
    ledger::validate_goal_weightage(input.weightage)?;
    ensure_category_exists(&state, input.category_id).await?;

    let goal = match GoalRepo::update(&state.pool, appraisal_id, goal_id, &input).await? {
        DraftWrite::Applied(goal) => goal,
        DraftWrite::Missing => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Goal",
                id: goal_id,
            }))
        }
        DraftWrite::StageChanged => return Err(AppError::Core(CoreError::ConcurrentModification)),
    };

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        goal_id = goal_id,
        weightage = goal.weightage,
        "Goal updated"
    );

    Ok(Json(DataResponse { data: goal }))
}

/// DELETE /api/v1/appraisals/{appraisal_id}/goals/{goal_id}
///
/// Remove a goal from a Draft appraisal.
pub async fn remove_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((appraisal_id, goal_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    lifecycle::check_edit_goals(&auth.actor(), &appraisal.view()?)?;

    match GoalRepo::delete(&state.pool, appraisal_id, goal_id).await? {
        DraftWrite::Applied(()) => {}
        DraftWrite::Missing => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Goal",
                id: goal_id,
            }))
        }
        DraftWrite::StageChanged => return Err(AppError::Core(CoreError::ConcurrentModification)),
    }

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        goal_id = goal_id,
        "Goal removed"
    );

    Ok(StatusCode::NO_CONTENT)
}
