//! Role-based access control extractors.
//!
//! Wraps [`AuthUser`] and rejects requests whose role does not meet the
//! requirement, delegating the decision to the core access policy so no
//! role logic lives in the HTTP layer.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use appraise_core::error::CoreError;
use appraise_core::policy;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a manager-level role (keyword match on the role label, or role
/// level above the policy threshold). Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn managers_only(RequireManager(user): RequireManager) -> AppResult<Json<()>> {
///     // user is guaranteed manager-level here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !policy::is_manager_level(&user.actor()) {
            return Err(AppError::Core(CoreError::Forbidden));
        }
        Ok(RequireManager(user))
    }
}
