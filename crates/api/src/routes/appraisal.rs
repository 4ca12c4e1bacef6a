//! Route definitions for the appraisal lifecycle.
//!
//! ```text
//! POST   /                                      create_appraisal (manager)
//! GET    /                                      list_appraisals
//! GET    /{appraisal_id}                        get_appraisal
//! DELETE /{appraisal_id}                        delete_appraisal
//! POST   /{appraisal_id}/goals                  add_goal
//! PUT    /{appraisal_id}/goals/{goal_id}        update_goal
//! DELETE /{appraisal_id}/goals/{goal_id}        remove_goal
//! POST   /{appraisal_id}/submit                 submit
//! POST   /{appraisal_id}/acknowledge            acknowledge
//! POST   /{appraisal_id}/self-assessment        submit_self_assessment
//! POST   /{appraisal_id}/appraiser-evaluation   submit_appraiser_evaluation
//! POST   /{appraisal_id}/reviewer-evaluation    submit_reviewer_evaluation
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{appraisal, evaluation, goal};
use crate::state::AppState;

/// Appraisal routes, nested under `/appraisals`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(appraisal::create_appraisal).get(appraisal::list_appraisals),
        )
        .route(
            "/{appraisal_id}",
            get(appraisal::get_appraisal).delete(appraisal::delete_appraisal),
        )
        .route("/{appraisal_id}/goals", post(goal::add_goal))
        .route(
            "/{appraisal_id}/goals/{goal_id}",
            put(goal::update_goal).delete(goal::remove_goal),
        )
        .route("/{appraisal_id}/submit", post(appraisal::submit))
        .route("/{appraisal_id}/acknowledge", post(appraisal::acknowledge))
        .route(
            "/{appraisal_id}/self-assessment",
            post(evaluation::submit_self_assessment),
        )
        .route(
            "/{appraisal_id}/appraiser-evaluation",
            post(evaluation::submit_appraiser_evaluation),
        )
        .route(
            "/{appraisal_id}/reviewer-evaluation",
            post(evaluation::submit_reviewer_evaluation),
        )
}
