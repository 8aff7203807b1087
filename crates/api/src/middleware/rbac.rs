//! Role-gated extractors.
//!
//! Ownership rules live in the access policy; these only cover endpoints
//! that are closed to a role regardless of ownership.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use studio_core::error::CoreError;
use studio_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `photographer` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn photographer_only(RequirePhotographer(user): RequirePhotographer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequirePhotographer(pub AuthUser);

impl FromRequestParts<AppState> for RequirePhotographer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Photographer {
            return Err(AppError::Core(CoreError::Forbidden(
                "Photographer role required".into(),
            )));
        }
        Ok(RequirePhotographer(user))
    }
}
