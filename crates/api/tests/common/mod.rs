//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as `main.rs`)
//! and provides request helpers driven by `tower::ServiceExt::oneshot`, so
//! tests exercise the real routing, extractors, and error mapping without
//! a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use appraise_api::auth::jwt::{generate_access_token, JwtConfig};
use appraise_api::config::ServerConfig;
use appraise_api::routes;
use appraise_api::state::AppState;
use appraise_db::models::employee::{CreateEmployee, Employee};
use appraise_db::repositories::EmployeeRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an employee row and return it.
pub async fn seed_employee(
    pool: &PgPool,
    name: &str,
    role_label: &str,
    role_level: i16,
) -> Employee {
    let input = CreateEmployee {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        role_label: role_label.to_string(),
        role_level,
    };
    EmployeeRepo::create(pool, &input)
        .await
        .expect("employee insert should succeed")
}

/// Mint an access token for the given employee, signed with the test secret.
pub fn token_for(employee: &Employee) -> String {
    generate_access_token(
        employee.id,
        &employee.role_label,
        employee.role_level,
        &test_config().jwt,
    )
    .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send an unauthenticated GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an unauthenticated POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a bearer token and a JSON body.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a bearer token and an empty body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a bearer token and a JSON body.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Lifecycle fixtures
// ---------------------------------------------------------------------------

/// The three participants of a seeded appraisal plus their minted tokens.
pub struct Scenario {
    pub appraisee: Employee,
    pub appraiser: Employee,
    pub reviewer: Employee,
    pub appraisee_token: String,
    pub appraiser_token: String,
    pub reviewer_token: String,
}

/// Seed a standard participant trio: a level-1 appraisee, a manager-level
/// appraiser, and a manager-level reviewer.
pub async fn seed_scenario(pool: &PgPool) -> Scenario {
    let appraisee = seed_employee(pool, "Asha Rao", "Software Engineer", 1).await;
    let appraiser = seed_employee(pool, "Miguel Ortiz", "Engineering Manager", 3).await;
    let reviewer = seed_employee(pool, "Priya Nair", "Director of Engineering", 4).await;

    let appraisee_token = token_for(&appraisee);
    let appraiser_token = token_for(&appraiser);
    let reviewer_token = token_for(&reviewer);

    Scenario {
        appraisee,
        appraiser,
        reviewer,
        appraisee_token,
        appraiser_token,
        reviewer_token,
    }
}

/// Create a Draft appraisal via the API as the scenario's appraiser and
/// return its id.
pub async fn create_draft(pool: &PgPool, scenario: &Scenario) -> i64 {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "appraisee_id": scenario.appraisee.id,
        "appraiser_id": scenario.appraiser.id,
        "reviewer_id": scenario.reviewer.id,
        "type_id": 1,
        "type_range_id": null,
        "period_start": "2026-01-01",
        "period_end": "2026-06-30",
    });
    let response = post_json_auth(app, "/api/v1/appraisals", &scenario.appraiser_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("created appraisal id")
}

/// Add a goal with the given weightage and return its id.
pub async fn add_goal(
    pool: &PgPool,
    scenario: &Scenario,
    appraisal_id: i64,
    title: &str,
    weightage: i16,
) -> i64 {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": title,
        "description": "",
        "category_id": null,
        "performance_factor": "Delivery",
        "importance": "High",
        "weightage": weightage,
        "template_id": null,
    });
    let response = post_json_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/goals"),
        &scenario.appraiser_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("created goal id")
}

/// Seed a Draft appraisal with goals at 60/40 weightage. Returns
/// `(appraisal_id, goal_ids)`.
pub async fn create_draft_with_goals(pool: &PgPool, scenario: &Scenario) -> (i64, Vec<i64>) {
    let appraisal_id = create_draft(pool, scenario).await;
    let g1 = add_goal(pool, scenario, appraisal_id, "Ship the billing revamp", 60).await;
    let g2 = add_goal(pool, scenario, appraisal_id, "Mentor two new hires", 40).await;
    (appraisal_id, vec![g1, g2])
}

/// Drive an appraisal from Draft through goal submission and acknowledgement
/// into the Appraisee Self Assessment stage. Returns `(appraisal_id, goal_ids)`.
pub async fn advance_to_self_assessment(pool: &PgPool, scenario: &Scenario) -> (i64, Vec<i64>) {
    let (appraisal_id, goal_ids) = create_draft_with_goals(pool, scenario).await;

    let app = build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/submit"),
        &scenario.appraiser_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/appraisals/{appraisal_id}/acknowledge"),
        &scenario.appraisee_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    (appraisal_id, goal_ids)
}

/// Build a `goals` array body rating every goal the same.
pub fn goal_ratings(goal_ids: &[i64], rating: i16, comment: &str) -> serde_json::Value {
    serde_json::Value::Array(
        goal_ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "goal_id": id,
                    "rating": rating,
                    "comment": comment,
                })
            })
            .collect(),
    )
}
