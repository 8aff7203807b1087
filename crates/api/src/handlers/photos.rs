//! Handlers for the `/photos` resource.

use axum::extract::State;
use axum::http::StatusCode;
use studio_core::error::CoreError;
use studio_core::policy::{ensure, Action, Resource};
use studio_core::types::DbId;
use studio_db::repositories::PhotoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// DELETE /photos/{id}
///
/// Only the owner of the photo's session (or an admin) may delete it. A photo
/// that is still in a gallery cannot be deleted (409); detach it first.
pub async fn delete_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let actor = auth.actor();
    let mut tx = state.pool.begin().await?;

    let photographer_id = PhotoRepo::find_owner_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;
    ensure(&actor, Action::Delete, &Resource::Photo { photographer_id })?;

    PhotoRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(photo_id = id, deleted_by = actor.id, "Photo deleted");
    Ok(StatusCode::NO_CONTENT)
}
