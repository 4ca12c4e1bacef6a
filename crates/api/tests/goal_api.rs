//! HTTP-level integration tests for goal management within a Draft appraisal.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

fn goal_body(title: &str, weightage: i16) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "",
        "category_id": null,
        "performance_factor": "Delivery",
        "importance": "High",
        "weightage": weightage,
        "template_id": null,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_goal_returns_201(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let appraisal_id = common::create_draft(&pool, &scenario).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals"),
        &scenario.appraiser_token,
        goal_body("Ship the billing revamp", 60),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Ship the billing revamp");
    assert_eq!(json["data"]["weightage"], 60);
    assert!(json["data"]["self_rating"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_goal_with_zero_weightage_returns_400(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let appraisal_id = common::create_draft(&pool, &scenario).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals"),
        &scenario.appraiser_token,
        goal_body("Weightless goal", 0),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_GOAL_WEIGHTAGE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_goal_with_empty_title_returns_400(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let appraisal_id = common::create_draft(&pool, &scenario).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals"),
        &scenario.appraiser_token,
        goal_body("", 50),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_goal_with_unknown_category_returns_404(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let appraisal_id = common::create_draft(&pool, &scenario).await;

    let mut body = goal_body("Categorised goal", 50);
    body["category_id"] = serde_json::json!(999_999);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals"),
        &scenario.appraiser_token,
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_appraiser_may_edit_goals(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let appraisal_id = common::create_draft(&pool, &scenario).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals"),
        &scenario.appraisee_token,
        goal_body("Not my goal to set", 50),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn goal_edits_rejected_after_submit(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let (appraisal_id, goal_ids) = common::create_draft_with_goals(&pool, &scenario).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/submit"),
        &scenario.appraiser_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Adding is locked.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals"),
        &scenario.appraiser_token,
        goal_body("Late addition", 10),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // So is deleting.
    let app = common::build_test_app(pool);
    let response = delete_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals/{}", goal_ids[0]),
        &scenario.appraiser_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_goal_replaces_fields(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let appraisal_id = common::create_draft(&pool, &scenario).await;
    let goal_id = common::add_goal(&pool, &scenario, appraisal_id, "Original title", 60).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "title": "Revised title",
        "description": "Narrowed scope after planning",
        "category_id": null,
        "performance_factor": "Delivery",
        "importance": "Medium",
        "weightage": 45,
    });
    let response = put_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals/{goal_id}"),
        &scenario.appraiser_token,
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Revised title");
    assert_eq!(json["data"]["weightage"], 45);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_goal_under_wrong_appraisal_returns_404(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let first = common::create_draft(&pool, &scenario).await;
    let second = common::create_draft(&pool, &scenario).await;
    let goal_id = common::add_goal(&pool, &scenario, first, "Belongs to the first", 60).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/appraisals/{second}/goals/{goal_id}"),
        &scenario.appraiser_token,
        serde_json::json!({
            "title": "Hijacked",
            "weightage": 45,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_goal_returns_204(pool: PgPool) {
    let scenario = common::seed_scenario(&pool).await;
    let appraisal_id = common::create_draft(&pool, &scenario).await;
    let goal_id = common::add_goal(&pool, &scenario, appraisal_id, "Short-lived goal", 60).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals/{goal_id}"),
        &scenario.appraiser_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}"),
        &scenario.appraiser_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["goals"].as_array().unwrap().len(), 0);
}
