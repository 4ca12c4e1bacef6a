use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use appraise_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses
/// with a stable machine-readable `code` per error kind.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `appraise-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to an HTTP status, stable code, and message.
///
/// The validation family maps to 400 with one code per kind so clients can
/// render field-level feedback; `WrongStage` and `ConcurrentModification`
/// are conflicts with the current server state, hence 409.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Unauthorized(msg) => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
        }
        CoreError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", err.to_string()),
        CoreError::WrongStage { .. } => (StatusCode::CONFLICT, "WRONG_STAGE", err.to_string()),
        CoreError::ConcurrentModification => (
            StatusCode::CONFLICT,
            "CONCURRENT_MODIFICATION",
            err.to_string(),
        ),
        CoreError::IncompleteWeightage { .. } => (
            StatusCode::BAD_REQUEST,
            "INCOMPLETE_WEIGHTAGE",
            err.to_string(),
        ),
        CoreError::InvalidGoalWeightage { .. } => (
            StatusCode::BAD_REQUEST,
            "INVALID_GOAL_WEIGHTAGE",
            err.to_string(),
        ),
        CoreError::RatingOutOfRange { .. } => (
            StatusCode::BAD_REQUEST,
            "RATING_OUT_OF_RANGE",
            err.to_string(),
        ),
        CoreError::IncompleteStage(_) => (
            StatusCode::BAD_REQUEST,
            "INCOMPLETE_STAGE",
            err.to_string(),
        ),
        CoreError::InvalidReviewer(_) => (
            StatusCode::BAD_REQUEST,
            "INVALID_REVIEWER",
            err.to_string(),
        ),
        CoreError::InvalidDateRange => (
            StatusCode::BAD_REQUEST,
            "INVALID_DATE_RANGE",
            err.to_string(),
        ),
        CoreError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn concurrent_modification_maps_to_409_with_stable_code() {
        assert_matches!(
            classify_core_error(&CoreError::ConcurrentModification),
            (StatusCode::CONFLICT, "CONCURRENT_MODIFICATION", _)
        );
    }

    #[test]
    fn wrong_stage_maps_to_409_and_names_the_current_stage() {
        let (status, code, message) = classify_core_error(&CoreError::WrongStage {
            current: "Appraisee Self Assessment",
        });
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "WRONG_STAGE");
        assert!(message.contains("Appraisee Self Assessment"));
    }

    #[test]
    fn validation_family_maps_to_400_with_per_kind_codes() {
        assert_matches!(
            classify_core_error(&CoreError::IncompleteWeightage { total: 99 }),
            (StatusCode::BAD_REQUEST, "INCOMPLETE_WEIGHTAGE", _)
        );
        assert_matches!(
            classify_core_error(&CoreError::RatingOutOfRange { rating: 6 }),
            (StatusCode::BAD_REQUEST, "RATING_OUT_OF_RANGE", _)
        );
        assert_matches!(
            classify_core_error(&CoreError::InvalidDateRange),
            (StatusCode::BAD_REQUEST, "INVALID_DATE_RANGE", _)
        );
    }

    #[test]
    fn row_not_found_maps_to_404() {
        assert_matches!(
            classify_sqlx_error(&sqlx::Error::RowNotFound),
            (StatusCode::NOT_FOUND, "NOT_FOUND", _)
        );
    }
}
