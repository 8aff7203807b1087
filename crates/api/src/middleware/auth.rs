//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use studio_core::error::CoreError;
use studio_core::policy::Actor;
use studio_core::roles::Role;
use studio_core::types::DbId;
use studio_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token subject (an email) is looked up in the users table on every
/// request; a token whose user no longer exists is rejected.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, role = %auth.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's role as currently stored.
    pub role: Role,
    /// The email the token was issued for.
    pub email: String,
}

impl AuthUser {
    /// The identity handed to the access policy.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Could not validate credentials"))?;

        let mut conn = state.pool.acquire().await?;
        let user = UserRepo::find_by_email(&mut *conn, &claims.sub)
            .await?
            .ok_or_else(|| unauthorized("Could not validate credentials"))?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role()?,
            email: user.email,
        })
    }
}
