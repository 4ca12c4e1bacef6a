//! Read-only reference data routes: appraisal types and goal categories.

use axum::extract::State;
use axum::{routing::get, Json, Router};

use appraise_db::models::reference::{AppraisalType, GoalCategory};
use appraise_db::repositories::ReferenceRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/appraisal-types
async fn list_types(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AppraisalType>>>> {
    let types = ReferenceRepo::list_types(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

/// GET /api/v1/goal-categories
async fn list_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<GoalCategory>>>> {
    let categories = ReferenceRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// Top-level reference data routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appraisal-types", get(list_types))
        .route("/goal-categories", get(list_categories))
}
