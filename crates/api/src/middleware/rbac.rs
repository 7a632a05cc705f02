//! Role-based access control extractors.
//!
//! Each extractor wraps [`Actor`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dubline_core::error::CoreError;
use dubline_core::roles::{ROLE_ADMIN, ROLE_LEADER};

use super::auth::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub Actor);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = Actor::from_request_parts(parts, state).await?;
        if actor.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(actor))
    }
}

/// Requires `leader` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn elevated(RequireLeader(actor): RequireLeader) -> AppResult<Json<()>> {
///     // actor is guaranteed to hold an elevated project role here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireLeader(pub Actor);

impl FromRequestParts<AppState> for RequireLeader {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = Actor::from_request_parts(parts, state).await?;
        if actor.role != ROLE_ADMIN && actor.role != ROLE_LEADER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Leader or Admin role required".into(),
            )));
        }
        Ok(RequireLeader(actor))
    }
}
