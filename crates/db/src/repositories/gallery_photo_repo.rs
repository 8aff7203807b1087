//! Repository for the `gallery_photos` association table and the joined
//! photo-in-gallery view.

use sqlx::PgConnection;
use studio_core::gallery::CurationFlag;
use studio_core::types::DbId;

use crate::models::gallery_photo::{GalleryPhoto, PhotoInGallery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, gallery_id, photo_id, selected, favorite";

/// Select list for the photo-in-gallery join (`gp` = gallery_photos, `p` = photos).
const VIEW_COLUMNS: &str = "gp.id AS gallery_photo_id, p.id AS photo_id, p.description, p.path, \
                            gp.selected, gp.favorite";

/// Provides operations on gallery/photo associations.
pub struct GalleryPhotoRepo;

impl GalleryPhotoRepo {
    /// Associate a photo with a gallery. Both flags start out `false`.
    ///
    /// A second association of the same pair violates
    /// `uq_gallery_photos_gallery_photo`.
    pub async fn attach(
        conn: &mut PgConnection,
        gallery_id: DbId,
        photo_id: DbId,
    ) -> Result<GalleryPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_photos (gallery_id, photo_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(gallery_id)
            .bind(photo_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find the association row for a (gallery, photo) pair.
    pub async fn find_pair(
        conn: &mut PgConnection,
        gallery_id: DbId,
        photo_id: DbId,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM gallery_photos WHERE gallery_id = $1 AND photo_id = $2");
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(gallery_id)
            .bind(photo_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Write a single curation flag on an association row. The other flag
    /// is left as stored.
    pub async fn set_flag(
        conn: &mut PgConnection,
        id: DbId,
        flag: CurationFlag,
        value: bool,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_photos SET {column} = $2 WHERE id = $1 RETURNING {COLUMNS}",
            column = flag.column()
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Remove a photo from a gallery. Returns `true` if a row was removed.
    pub async fn detach(
        conn: &mut PgConnection,
        gallery_id: DbId,
        photo_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_photos WHERE gallery_id = $1 AND photo_id = $2")
            .bind(gallery_id)
            .bind(photo_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All photos of a gallery, in the order they were added.
    pub async fn list_photos_in_gallery(
        conn: &mut PgConnection,
        gallery_id: DbId,
    ) -> Result<Vec<PhotoInGallery>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM gallery_photos gp
             JOIN photos p ON p.id = gp.photo_id
             WHERE gp.gallery_id = $1
             ORDER BY gp.id ASC"
        );
        sqlx::query_as::<_, PhotoInGallery>(&query)
            .bind(gallery_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// One photo of a gallery with its curation flags.
    pub async fn find_photo_in_gallery(
        conn: &mut PgConnection,
        gallery_id: DbId,
        photo_id: DbId,
    ) -> Result<Option<PhotoInGallery>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM gallery_photos gp
             JOIN photos p ON p.id = gp.photo_id
             WHERE gp.gallery_id = $1 AND gp.photo_id = $2"
        );
        sqlx::query_as::<_, PhotoInGallery>(&query)
            .bind(gallery_id)
            .bind(photo_id)
            .fetch_optional(&mut *conn)
            .await
    }
}
