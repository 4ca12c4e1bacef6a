//! Handlers for the `/appraisals` resource: creation, snapshot reads,
//! deletion, and the submit/acknowledge lifecycle edges.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;

use appraise_core::error::CoreError;
use appraise_core::evaluation::{GoalEvaluation, OverallEvaluation};
use appraise_core::lifecycle;
use appraise_core::policy::{self, EditableFields};
use appraise_core::status::Stage;
use appraise_core::types::DbId;
use appraise_db::models::appraisal::{Appraisal, CreateAppraisalRequest};
use appraise_db::models::goal::Goal;
use appraise_db::repositories::{AppraisalRepo, EmployeeRepo, GoalRepo, ReferenceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// An appraisal snapshot: the row, its goals, the human-readable status
/// name, which field groups the requesting actor may currently edit, and
/// which stages already have all their fields persisted.
#[derive(Debug, Serialize)]
pub struct AppraisalSnapshot {
    pub appraisal: Appraisal,
    pub goals: Vec<Goal>,
    pub status: &'static str,
    pub editable: EditableFields,
    pub progress: StageProgress,
}

/// Completeness of each evaluation stage over the persisted data.
#[derive(Debug, Serialize)]
pub struct StageProgress {
    pub self_assessment: bool,
    pub appraiser_evaluation: bool,
    pub reviewer_evaluation: bool,
}

fn stage_progress(appraisal: &Appraisal, goals: &[Goal]) -> StageProgress {
    let evaluations: Vec<GoalEvaluation> = goals.iter().map(Goal::evaluation).collect();
    StageProgress {
        self_assessment: lifecycle::is_stage_complete(
            &evaluations,
            &OverallEvaluation::default(),
            Stage::SelfAssessment,
        ),
        appraiser_evaluation: lifecycle::is_stage_complete(
            &evaluations,
            &appraisal.appraiser_overall(),
            Stage::AppraiserEvaluation,
        ),
        reviewer_evaluation: lifecycle::is_stage_complete(
            &evaluations,
            &appraisal.reviewer_overall(),
            Stage::ReviewerEvaluation,
        ),
    }
}

/// Load an appraisal or fail with 404.
pub(crate) async fn load_appraisal(pool: &PgPool, id: DbId) -> AppResult<Appraisal> {
    AppraisalRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appraisal",
            id,
        }))
}

/// Verify an employee id references an existing row.
async fn ensure_employee_exists(pool: &PgPool, id: DbId) -> AppResult<()> {
    EmployeeRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    Ok(())
}

/// POST /api/v1/appraisals
///
/// Create a new appraisal in Draft. Manager-level only; the core guard
/// re-checks the role alongside the date-range and reviewer-distinctness
/// invariants.
pub async fn create_appraisal(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<CreateAppraisalRequest>,
) -> AppResult<impl IntoResponse> {
    lifecycle::check_create(
        &auth.actor(),
        input.appraisee_id,
        input.appraiser_id,
        input.reviewer_id,
        input.period_start,
        input.period_end,
    )?;

    for employee_id in [input.appraisee_id, input.appraiser_id, input.reviewer_id] {
        ensure_employee_exists(&state.pool, employee_id).await?;
    }

    ReferenceRepo::find_type_by_id(&state.pool, input.type_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AppraisalType",
            id: input.type_id,
        }))?;

    if let Some(range_id) = input.type_range_id {
        let range = ReferenceRepo::find_range_by_id(&state.pool, range_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "AppraisalTypeRange",
                id: range_id,
            }))?;
        if range.type_id != input.type_id {
            return Err(AppError::Core(CoreError::Validation(format!(
                "type range {range_id} does not belong to appraisal type {}",
                input.type_id
            ))));
        }
    }

    let appraisal = AppraisalRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal.id,
        appraisee_id = appraisal.appraisee_id,
        "Appraisal created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: appraisal })))
}

/// GET /api/v1/appraisals
///
/// List every appraisal the authenticated employee participates in.
pub async fn list_appraisals(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Appraisal>>>> {
    let appraisals = AppraisalRepo::list_for_employee(&state.pool, auth.employee_id).await?;
    Ok(Json(DataResponse { data: appraisals }))
}

/// GET /api/v1/appraisals/{appraisal_id}
///
/// Return the current snapshot plus the field groups this actor may edit.
/// Visible only to the three participants.
pub async fn get_appraisal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<AppraisalSnapshot>>> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    let actor = auth.actor();
    let participants = appraisal.participants();

    if !policy::can_view(&actor, &participants) {
        return Err(AppError::Core(CoreError::Forbidden));
    }

    let goals = GoalRepo::list_for_appraisal(&state.pool, appraisal_id).await?;
    let status = appraisal.status()?;
    let editable = policy::editable_fields(&actor, &participants, status);

    Ok(Json(DataResponse {
        data: AppraisalSnapshot {
            status: status.display_name(),
            editable,
            progress: stage_progress(&appraisal, &goals),
            goals,
            appraisal,
        },
    }))
}

/// DELETE /api/v1/appraisals/{appraisal_id}
///
/// Remove a Draft appraisal and its goals atomically. Only the appraiser
/// may delete, and only while the appraisal has not been submitted.
pub async fn delete_appraisal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    lifecycle::check_delete(&auth.actor(), &appraisal.view()?)?;

    let deleted = AppraisalRepo::delete_draft(&state.pool, appraisal_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::ConcurrentModification));
    }

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        "Draft appraisal deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/appraisals/{appraisal_id}/submit
///
/// Draft -> Submitted. The appraiser submits once goal weightages total
/// exactly 100.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Appraisal>>> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    let goals = GoalRepo::list_for_appraisal(&state.pool, appraisal_id).await?;
    let weightages: Vec<i16> = goals.iter().map(|g| g.weightage).collect();

    let view = appraisal.view()?;
    let next = lifecycle::check_submit(&auth.actor(), &view, &weightages)?;

    // The repo re-checks the stage and the weightage total under a row
    // lock; `None` means a goal edit or another submit raced this one.
    let updated = AppraisalRepo::submit_draft(&state.pool, appraisal_id)
        .await?
        .ok_or(AppError::Core(CoreError::ConcurrentModification))?;

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        status = next.display_name(),
        "Appraisal submitted"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/appraisals/{appraisal_id}/acknowledge
///
/// Submitted -> AppraiseeSelfAssessment. The appraisee acknowledges the
/// submitted goals, which stamps `acknowledged_at`.
pub async fn acknowledge(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(appraisal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Appraisal>>> {
    let appraisal = load_appraisal(&state.pool, appraisal_id).await?;
    lifecycle::check_acknowledge(&auth.actor(), &appraisal.view()?)?;

    let updated = AppraisalRepo::acknowledge(&state.pool, appraisal_id)
        .await?
        .ok_or(AppError::Core(CoreError::ConcurrentModification))?;

    tracing::info!(
        user_id = auth.employee_id,
        appraisal_id = appraisal_id,
        "Appraisal acknowledged"
    );

    Ok(Json(DataResponse { data: updated }))
}
