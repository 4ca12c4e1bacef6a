pub mod appraisal;
pub mod health;
pub mod reference;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /appraisals                lifecycle engine (see routes::appraisal)
/// /appraisal-types           reference data
/// /goal-categories           reference data
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/appraisals", appraisal::router())
        .merge(reference::router())
}
