//! Actor-identity extractor.
//!
//! Session management lives outside this service: the platform gateway
//! authenticates the user and injects `x-actor-id` and `x-actor-role`
//! headers on every forwarded request. The extractor only validates their
//! presence and shape.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated actor on whose behalf a request runs.
///
/// Use this as an extractor parameter in any handler that requires an
/// authenticated caller:
///
/// ```ignore
/// async fn my_handler(actor: Actor) -> AppResult<Json<()>> {
///     tracing::info!(actor_id = actor.user_id, role = %actor.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Actor {
    /// The platform user id (from `x-actor-id`).
    pub user_id: DbId,
    /// The project role name (from `x-actor-role`, e.g. `"leader"`).
    pub role: String,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<DbId>().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing or malformed x-actor-id header".into(),
                ))
            })?;

        let role = parts
            .headers
            .get("x-actor-role")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-actor-role header".into(),
                ))
            })?
            .to_string();

        Ok(Actor { user_id, role })
    }
}
