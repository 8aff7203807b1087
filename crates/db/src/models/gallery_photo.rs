//! Gallery/photo association model and the joined photo-in-gallery view.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::gallery::CurationState;
use studio_core::types::DbId;

/// A row from the `gallery_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryPhoto {
    pub id: DbId,
    pub gallery_id: DbId,
    pub photo_id: DbId,
    pub selected: bool,
    pub favorite: bool,
}

impl GalleryPhoto {
    pub fn curation(&self) -> CurationState {
        CurationState::new(self.selected, self.favorite)
    }
}

/// A photo as seen inside one gallery: photo columns joined with the
/// association's curation flags.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoInGallery {
    pub gallery_photo_id: DbId,
    pub photo_id: DbId,
    pub description: String,
    pub path: String,
    pub selected: bool,
    pub favorite: bool,
}
