//! Gallery aggregation: the nested gallery view, curation toggles, photo
//! attachment, and gallery creation and update.

use serde::Deserialize;
use sqlx::PgConnection;
use studio_core::error::CoreError;
use studio_core::gallery::{normalize_client_id, CurationFlag};
use studio_core::policy::{ensure, Action, Actor, Resource};
use studio_core::roles::Role;
use studio_core::scope::curation_scope;
use studio_core::types::DbId;
use studio_db::models::gallery::{CreateGallery, Gallery, GalleryWithPhotos, UpdateGallery};
use studio_db::models::gallery_photo::PhotoInGallery;
use studio_db::repositories::{GalleryPhotoRepo, GalleryRepo, PhotoRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Payload for creating a gallery. It has no owner field; the owner is
/// always the acting photographer.
#[derive(Debug, Deserialize, Validate)]
pub struct NewGallery {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    /// `0` and `null` both mean "not assigned to a client".
    pub client_id: Option<DbId>,
}

/// Partial update of a gallery. Absent fields keep their values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GalleryChanges {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    /// `0` unassigns the gallery; `null` or absent keeps the current client.
    pub client_id: Option<DbId>,
}

fn gallery_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Gallery",
        id,
    })
}

fn photo_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Photo", id })
}

/// Load a gallery and check `action` against it.
async fn find_and_authorize(
    conn: &mut PgConnection,
    gallery_id: DbId,
    actor: &Actor,
    action: Action,
) -> AppResult<Gallery> {
    let gallery = GalleryRepo::find_by_id(conn, gallery_id)
        .await?
        .ok_or_else(|| gallery_not_found(gallery_id))?;

    ensure(actor, action, &gallery.as_resource())?;
    Ok(gallery)
}

/// A gallery with all of its photos, in the order they were added.
///
/// An unknown gallery is `NotFound`; a gallery the actor may not read is
/// `Forbidden`. A gallery without photos yields an empty list.
pub async fn get_gallery_with_photos(
    conn: &mut PgConnection,
    gallery_id: DbId,
    actor: &Actor,
) -> AppResult<GalleryWithPhotos> {
    let gallery = find_and_authorize(conn, gallery_id, actor, Action::Read).await?;
    let photos = GalleryPhotoRepo::list_photos_in_gallery(conn, gallery.id).await?;
    Ok(GalleryWithPhotos::compose(gallery, photos))
}

/// Flip one curation flag of a photo inside a gallery assigned to `actor`.
///
/// Only the flag named by `flag` is written. A gallery that does not exist,
/// one assigned to somebody else and any gallery looked up by a non-client
/// are all reported as `NotFound`.
/// Concurrent toggles are last-write-wins.
pub async fn toggle_curation(
    conn: &mut PgConnection,
    gallery_id: DbId,
    photo_id: DbId,
    actor: &Actor,
    flag: CurationFlag,
) -> AppResult<PhotoInGallery> {
    let scope = curation_scope(actor);

    let gallery = GalleryRepo::find_by_id_scoped(conn, gallery_id, &scope)
        .await?
        .ok_or_else(|| gallery_not_found(gallery_id))?;
    ensure(actor, Action::ToggleSelection, &gallery.as_resource())?;

    let pair = GalleryPhotoRepo::find_pair(conn, gallery.id, photo_id)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))?;

    let next = pair.curation().toggled(flag);
    GalleryPhotoRepo::set_flag(conn, pair.id, flag, next.get(flag))
        .await?
        .ok_or_else(|| photo_not_found(photo_id))?;

    tracing::info!(
        gallery_id,
        photo_id,
        client_id = actor.id,
        flag = flag.column(),
        value = next.get(flag),
        "Curation flag toggled"
    );

    GalleryPhotoRepo::find_photo_in_gallery(conn, gallery.id, photo_id)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))
}

/// Flip the `selected` flag. `favorite` is left untouched.
pub async fn toggle_selection(
    conn: &mut PgConnection,
    gallery_id: DbId,
    photo_id: DbId,
    actor: &Actor,
) -> AppResult<PhotoInGallery> {
    toggle_curation(conn, gallery_id, photo_id, actor, CurationFlag::Selected).await
}

/// Flip the `favorite` flag. `selected` is left untouched.
pub async fn toggle_favorite(
    conn: &mut PgConnection,
    gallery_id: DbId,
    photo_id: DbId,
    actor: &Actor,
) -> AppResult<PhotoInGallery> {
    toggle_curation(conn, gallery_id, photo_id, actor, CurationFlag::Favorite).await
}

/// Create a gallery owned by the acting photographer.
///
/// Every other role is refused. A `client_id` of `0` is stored as null; any
/// other client id must name one of the photographer's own clients.
pub async fn create_gallery(
    conn: &mut PgConnection,
    input: NewGallery,
    actor: &Actor,
) -> AppResult<Gallery> {
    input.validate()?;

    let client_id = normalize_client_id(input.client_id);
    ensure(
        actor,
        Action::Create,
        &Resource::Gallery {
            photographer_id: actor.id,
            client_id,
        },
    )?;

    if let Some(client_id) = client_id {
        ensure_own_client(conn, client_id, actor.id).await?;
    }

    let gallery = GalleryRepo::create(
        conn,
        &CreateGallery {
            name: input.name,
            description: input.description,
            photographer_id: actor.id,
            client_id,
        },
    )
    .await?;

    tracing::info!(
        gallery_id = gallery.id,
        photographer_id = actor.id,
        client_id = ?gallery.client_id,
        "Gallery created"
    );
    Ok(gallery)
}

/// Apply `changes` to a gallery the actor may update.
///
/// A new `client_id` is normalized like on creation and must name one of the
/// gallery photographer's clients. The owner never changes.
pub async fn update_gallery(
    conn: &mut PgConnection,
    gallery_id: DbId,
    changes: GalleryChanges,
    actor: &Actor,
) -> AppResult<Gallery> {
    changes.validate()?;
    let gallery = find_and_authorize(conn, gallery_id, actor, Action::Update).await?;

    let client_id = changes.client_id.map(|id| normalize_client_id(Some(id)));
    if let Some(Some(client_id)) = client_id {
        ensure_own_client(conn, client_id, gallery.photographer_id).await?;
    }

    let updated = GalleryRepo::update(
        conn,
        gallery.id,
        &UpdateGallery {
            name: changes.name,
            description: changes.description,
            client_id,
        },
    )
    .await?
    .ok_or_else(|| gallery_not_found(gallery_id))?;

    tracing::info!(gallery_id, updated_by = actor.id, "Gallery updated");
    Ok(updated)
}

/// The referenced user must be a client belonging to `photographer_id`.
async fn ensure_own_client(
    conn: &mut PgConnection,
    client_id: DbId,
    photographer_id: DbId,
) -> AppResult<()> {
    let is_own_client = match UserRepo::find_by_id(conn, client_id).await? {
        Some(user) => {
            user.role()? == Role::Client && user.photographer_id == Some(photographer_id)
        }
        None => false,
    };

    if !is_own_client {
        return Err(AppError::Core(CoreError::Validation(format!(
            "client_id: user {client_id} is not one of your clients"
        ))));
    }
    Ok(())
}

/// Add a photo to a gallery. The photo must come from a session owned by
/// the gallery's photographer. Adding the same photo twice is a conflict.
pub async fn attach_photo(
    conn: &mut PgConnection,
    gallery_id: DbId,
    photo_id: DbId,
    actor: &Actor,
) -> AppResult<PhotoInGallery> {
    let gallery = find_and_authorize(conn, gallery_id, actor, Action::ManagePhotos).await?;

    let owner = PhotoRepo::find_owner_id(conn, photo_id)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))?;
    if owner != gallery.photographer_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "photo_id: photo {photo_id} does not belong to this gallery's photographer"
        ))));
    }

    GalleryPhotoRepo::attach(conn, gallery.id, photo_id).await?;

    GalleryPhotoRepo::find_photo_in_gallery(conn, gallery.id, photo_id)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))
}

/// Remove a photo from a gallery. The photo itself is kept.
pub async fn detach_photo(
    conn: &mut PgConnection,
    gallery_id: DbId,
    photo_id: DbId,
    actor: &Actor,
) -> AppResult<()> {
    let gallery = find_and_authorize(conn, gallery_id, actor, Action::ManagePhotos).await?;

    if !GalleryPhotoRepo::detach(conn, gallery.id, photo_id).await? {
        return Err(photo_not_found(photo_id));
    }
    Ok(())
}

/// Delete a gallery and its photo associations.
pub async fn delete_gallery(
    conn: &mut PgConnection,
    gallery_id: DbId,
    actor: &Actor,
) -> AppResult<()> {
    let gallery = find_and_authorize(conn, gallery_id, actor, Action::Delete).await?;
    GalleryRepo::delete(conn, gallery.id).await?;
    tracing::info!(gallery_id, deleted_by = actor.id, "Gallery deleted");
    Ok(())
}
