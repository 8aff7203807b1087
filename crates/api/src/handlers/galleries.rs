//! Handlers for the `/galleries` resource.
//!
//! Each handler opens one transaction, runs the gallery service inside it,
//! and commits on success.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studio_core::policy::ResourceKind;
use studio_core::scope::scope_for;
use studio_core::types::DbId;
use studio_db::models::gallery::{Gallery, GalleryWithPhotos};
use studio_db::models::gallery_photo::PhotoInGallery;
use studio_db::repositories::GalleryRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::services::gallery::{self, GalleryChanges, NewGallery};
use crate::state::AppState;

/// Request body for `POST /galleries/{id}/photos`.
#[derive(Debug, Deserialize)]
pub struct AttachPhotoRequest {
    pub photo_id: DbId,
}

/// GET /galleries/me/
///
/// Galleries visible to the caller: all for an admin, owned ones for a
/// photographer, assigned ones for a client.
pub async fn list_my_galleries(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Gallery>>> {
    let scope = scope_for(&auth.actor(), ResourceKind::Gallery)?;
    let mut conn = state.pool.acquire().await?;
    let galleries = GalleryRepo::list(&mut *conn, &scope).await?;
    Ok(Json(galleries))
}

/// GET /galleries/{id}
pub async fn get_gallery(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<GalleryWithPhotos>> {
    let mut tx = state.pool.begin().await?;
    let view = gallery::get_gallery_with_photos(&mut *tx, id, &auth.actor()).await?;
    tx.commit().await?;
    Ok(Json(view))
}

/// POST /galleries/
///
/// Photographers only. Returns 201 with the stored gallery.
pub async fn create_gallery(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<NewGallery>,
) -> AppResult<(StatusCode, Json<Gallery>)> {
    let mut tx = state.pool.begin().await?;
    let created = gallery::create_gallery(&mut *tx, input, &auth.actor()).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /galleries/{id}
///
/// Owner or admin. Absent fields keep their values.
pub async fn update_gallery(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<GalleryChanges>,
) -> AppResult<Json<Gallery>> {
    let mut tx = state.pool.begin().await?;
    let updated = gallery::update_gallery(&mut *tx, id, input, &auth.actor()).await?;
    tx.commit().await?;
    Ok(Json(updated))
}

/// DELETE /galleries/{id}
pub async fn delete_gallery(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    gallery::delete_gallery(&mut *tx, id, &auth.actor()).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /galleries/{id}/photos
pub async fn attach_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AttachPhotoRequest>,
) -> AppResult<(StatusCode, Json<PhotoInGallery>)> {
    let mut tx = state.pool.begin().await?;
    let photo = gallery::attach_photo(&mut *tx, id, input.photo_id, &auth.actor()).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// DELETE /galleries/{id}/photos/{photo_id}
pub async fn detach_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((gallery_id, photo_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    gallery::detach_photo(&mut *tx, gallery_id, photo_id, &auth.actor()).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /galleries/{id}/photos/{photo_id}/select
pub async fn toggle_selection(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((gallery_id, photo_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<PhotoInGallery>> {
    let mut tx = state.pool.begin().await?;
    let photo = gallery::toggle_selection(&mut *tx, gallery_id, photo_id, &auth.actor()).await?;
    tx.commit().await?;
    Ok(Json(photo))
}

/// PUT /galleries/{id}/photos/{photo_id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((gallery_id, photo_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<PhotoInGallery>> {
    let mut tx = state.pool.begin().await?;
    let photo = gallery::toggle_favorite(&mut *tx, gallery_id, photo_id, &auth.actor()).await?;
    tx.commit().await?;
    Ok(Json(photo))
}
