//! Gallery entity model, DTOs, and the nested gallery-with-photos view.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::policy::Resource;
use studio_core::types::{DbId, Timestamp};

use super::gallery_photo::PhotoInGallery;

/// A row from the `galleries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gallery {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub photographer_id: DbId,
    pub client_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl Gallery {
    /// Describe this gallery to the access policy.
    pub fn as_resource(&self) -> Resource {
        Resource::Gallery {
            photographer_id: self.photographer_id,
            client_id: self.client_id,
        }
    }
}

/// DTO for creating a new gallery.
///
/// `photographer_id` is always filled from the acting photographer, never
/// from a request payload.
#[derive(Debug)]
pub struct CreateGallery {
    pub name: String,
    pub description: Option<String>,
    pub photographer_id: DbId,
    pub client_id: Option<DbId>,
}

/// DTO for updating a gallery. Only non-`None` fields are applied.
///
/// `client_id` is doubly optional: `None` keeps the current assignment,
/// `Some(None)` unassigns the gallery.
#[derive(Debug, Default)]
pub struct UpdateGallery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<Option<DbId>>,
}

/// A gallery together with its photos, in association insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryWithPhotos {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub photographer_id: DbId,
    pub client_id: Option<DbId>,
    pub photos: Vec<PhotoInGallery>,
}

impl GalleryWithPhotos {
    pub fn compose(gallery: Gallery, photos: Vec<PhotoInGallery>) -> Self {
        Self {
            id: gallery.id,
            name: gallery.name,
            description: gallery.description,
            photographer_id: gallery.photographer_id,
            client_id: gallery.client_id,
            photos,
        }
    }
}
