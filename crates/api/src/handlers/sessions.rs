//! Handlers for the `/sessions` resource and the photos inside a session.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgConnection;
use studio_core::error::CoreError;
use studio_core::policy::{ensure, Action, Actor, Resource, ResourceKind};
use studio_core::scope::scope_for;
use studio_core::types::{DbId, Timestamp};
use studio_db::models::photo::{CreatePhoto, Photo};
use studio_db::models::photo_session::{CreatePhotoSession, PhotoSession, UpdatePhotoSession};
use studio_db::repositories::{PhotoRepo, PhotoSessionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequirePhotographer;
use crate::state::AppState;

/// Request body for `POST /sessions`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub date: Timestamp,
}

/// Request body for `PUT /sessions/{id}`. Absent fields keep their values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSessionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub date: Option<Timestamp>,
}

/// Request body for `POST /sessions/{id}/photos`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddPhotoRequest {
    #[serde(default)]
    pub description: String,
    /// Opaque storage reference; files themselves are not handled here.
    #[validate(length(min = 1))]
    pub path: String,
}

/// Load a session within the actor's scope and check `action` on it.
///
/// Sessions outside the scope are reported as not found.
async fn find_and_authorize(
    conn: &mut PgConnection,
    session_id: DbId,
    actor: &Actor,
    action: Action,
) -> AppResult<PhotoSession> {
    let scope = scope_for(actor, ResourceKind::PhotoSession)?;
    let session = PhotoSessionRepo::find_by_id_scoped(conn, session_id, &scope)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PhotoSession",
            id: session_id,
        }))?;

    ensure(
        actor,
        action,
        &Resource::PhotoSession {
            photographer_id: session.photographer_id,
        },
    )?;
    Ok(session)
}

/// GET /sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<PhotoSession>>> {
    let scope = scope_for(&auth.actor(), ResourceKind::PhotoSession)?;
    let mut conn = state.pool.acquire().await?;
    let sessions = PhotoSessionRepo::list(&mut *conn, &scope).await?;
    Ok(Json(sessions))
}

/// POST /sessions
///
/// Photographers only; the session is always owned by the caller.
pub async fn create_session(
    State(state): State<AppState>,
    RequirePhotographer(auth): RequirePhotographer,
    AppJson(input): AppJson<CreateSessionRequest>,
) -> AppResult<(StatusCode, Json<PhotoSession>)> {
    input.validate()?;
    let actor = auth.actor();
    ensure(
        &actor,
        Action::Create,
        &Resource::PhotoSession {
            photographer_id: actor.id,
        },
    )?;

    let mut tx = state.pool.begin().await?;
    let session = PhotoSessionRepo::create(
        &mut *tx,
        &CreatePhotoSession {
            name: input.name,
            date: input.date,
            photographer_id: actor.id,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(session_id = session.id, photographer_id = actor.id, "Photo session created");
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<PhotoSession>> {
    let mut conn = state.pool.acquire().await?;
    let session = find_and_authorize(&mut *conn, id, &auth.actor(), Action::Read).await?;
    Ok(Json(session))
}

/// PUT /sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSessionRequest>,
) -> AppResult<Json<PhotoSession>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;
    let session = find_and_authorize(&mut *tx, id, &auth.actor(), Action::Update).await?;
    let updated = PhotoSessionRepo::update(
        &mut *tx,
        session.id,
        &UpdatePhotoSession {
            name: input.name,
            date: input.date,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "PhotoSession",
        id,
    }))?;
    tx.commit().await?;

    Ok(Json(updated))
}

/// DELETE /sessions/{id}
///
/// Removes the session and its photos. Refused with 409 while any of its
/// photos is still in a gallery.
pub async fn delete_session(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let actor = auth.actor();
    let mut tx = state.pool.begin().await?;
    find_and_authorize(&mut *tx, id, &actor, Action::Delete).await?;
    PhotoSessionRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(session_id = id, deleted_by = actor.id, "Photo session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /sessions/{id}/photos
pub async fn list_session_photos(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Vec<Photo>>> {
    let mut conn = state.pool.acquire().await?;
    let session = find_and_authorize(&mut *conn, id, &auth.actor(), Action::Read).await?;
    let photos = PhotoRepo::list_for_session(&mut *conn, session.id).await?;
    Ok(Json(photos))
}

/// POST /sessions/{id}/photos
///
/// Record a photo in a session. Returns 201.
pub async fn add_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AddPhotoRequest>,
) -> AppResult<(StatusCode, Json<Photo>)> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;
    let session = find_and_authorize(&mut *tx, id, &auth.actor(), Action::ManagePhotos).await?;
    let photo = PhotoRepo::create(
        &mut *tx,
        &CreatePhoto {
            description: input.description,
            path: input.path,
            session_id: session.id,
        },
    )
    .await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(photo)))
}
