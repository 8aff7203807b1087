//! Handler for the `/token` resource (password login).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::error::CoreError;
use studio_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppForm;
use crate::state::AppState;

/// OAuth2 password-grant form body for `POST /token`.
///
/// `username` carries the user's email. Extra OAuth2 fields (`grant_type`,
/// `scope`, ...) are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Incorrect email or password".into(),
    ))
}

/// POST /token
///
/// Exchange email + password for a bearer token. Unknown email and wrong
/// password produce the same 401.
pub async fn issue_token(
    State(state): State<AppState>,
    AppForm(input): AppForm<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let mut conn = state.pool.acquire().await?;
    let user = UserRepo::find_by_email(&mut *conn, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(&user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "Access token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
