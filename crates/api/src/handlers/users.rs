//! Handlers for the `/users` resource.
//!
//! Admins manage every account. Photographers create and manage their own
//! clients. Everyone may read and update their own record. A user outside the
//! actor's visibility is reported as not found.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgConnection;
use studio_core::error::CoreError;
use studio_core::policy::{authorize, ensure, Action, Actor, Resource, ResourceKind};
use studio_core::roles::{validate_owner_link, Role};
use studio_core::scope::scope_for;
use studio_core::types::DbId;
use studio_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use studio_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Required for clients created by an admin. Ignored when a photographer
    /// creates a client (the photographer becomes the owner).
    pub photographer_id: Option<DbId>,
}

/// Request body for `PUT /users/{id}`. Absent fields keep their values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    /// An empty string is treated like an absent field.
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// Load a user the actor is allowed to see. Anything else is `NotFound`.
async fn find_visible_user(conn: &mut PgConnection, id: DbId, actor: &Actor) -> AppResult<User> {
    let user = UserRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    if !authorize(actor, Action::Read, &user.as_resource()?).is_allowed() {
        return Err(user_not_found(id));
    }
    Ok(user)
}

/// Hash a new password after checking its strength.
fn hash_new_password(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Resolve the owner a new account will carry.
///
/// A photographer's clients always belong to that photographer; an admin
/// names the owner explicitly.
fn owner_for_new_user(actor: &Actor, input: &CreateUserRequest) -> Option<DbId> {
    match (actor.role, input.role) {
        (Role::Photographer, Role::Client) => Some(actor.id),
        _ => input.photographer_id,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users/
///
/// Create an account. Returns 201 with the safe [`UserResponse`].
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let actor = auth.actor();
    let photographer_id = owner_for_new_user(&actor, &input);

    ensure(
        &actor,
        Action::Create,
        &Resource::User {
            id: None,
            role: input.role,
            photographer_id,
        },
    )?;

    input.validate()?;
    validate_owner_link(input.role, photographer_id)?;

    let mut tx = state.pool.begin().await?;

    if let Some(owner_id) = photographer_id {
        let owner = UserRepo::find_by_id(&mut *tx, owner_id).await?;
        let is_photographer = match owner {
            Some(owner) => owner.role()? == Role::Photographer,
            None => false,
        };
        if !is_photographer {
            return Err(AppError::Core(CoreError::Validation(format!(
                "photographer_id: user {owner_id} is not a photographer"
            ))));
        }
    }

    let password_hash = hash_new_password(&input.password)?;
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role,
            photographer_id,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        created_by = actor.id,
        "User created"
    );

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let mut conn = state.pool.acquire().await?;
    let user = UserRepo::find_by_id(&mut *conn, auth.user_id)
        .await?
        .ok_or_else(|| user_not_found(auth.user_id))?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /users
///
/// Admins see every account, photographers see their clients, clients are
/// refused.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let scope = scope_for(&auth.actor(), ResourceKind::User)?;

    let mut conn = state.pool.acquire().await?;
    let users = UserRepo::list(&mut *conn, &scope).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    let mut conn = state.pool.acquire().await?;
    let user = find_visible_user(&mut *conn, id, &auth.actor()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{id}
///
/// Merge update: absent fields keep their stored values. A non-empty
/// `password` is strength-checked and re-hashed.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    let actor = auth.actor();

    let mut tx = state.pool.begin().await?;
    let user = find_visible_user(&mut *tx, id, &actor).await?;
    ensure(&actor, Action::Update, &user.as_resource()?)?;

    let password_hash = match input.password.as_deref() {
        Some(password) if !password.is_empty() => Some(hash_new_password(password)?),
        _ => None,
    };

    let updated = UserRepo::update(
        &mut *tx,
        id,
        &UpdateUser {
            name: input.name,
            email: input.email,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| user_not_found(id))?;
    tx.commit().await?;

    Ok(Json(UserResponse::from(updated)))
}

/// DELETE /users/{id}
///
/// Returns 204. A photographer who still owns clients, sessions or galleries
/// cannot be removed (409).
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let actor = auth.actor();

    let mut tx = state.pool.begin().await?;
    let user = find_visible_user(&mut *tx, id, &actor).await?;
    ensure(&actor, Action::Delete, &user.as_resource()?)?;

    UserRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(user_id = id, deleted_by = actor.id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
