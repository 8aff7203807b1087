//! Repository for the `photos` table.

use sqlx::PgConnection;
use studio_core::types::DbId;

use crate::models::photo::{CreatePhoto, Photo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, description, path, session_id, created_at";

/// Provides CRUD operations for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a new photo record, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (description, path, session_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(&input.description)
            .bind(&input.path)
            .bind(input.session_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a photo by its internal ID.
    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List all photos of a session in upload order.
    pub async fn list_for_session(
        conn: &mut PgConnection,
        session_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE session_id = $1 ORDER BY id");
        sqlx::query_as::<_, Photo>(&query)
            .bind(session_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Resolve the photographer who owns a photo through its session.
    pub async fn find_owner_id(
        conn: &mut PgConnection,
        photo_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT s.photographer_id
             FROM photos p
             JOIN photo_sessions s ON s.id = p.session_id
             WHERE p.id = $1",
        )
        .bind(photo_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(|(owner,)| owner))
    }

    /// Delete a photo. Fails with a foreign key violation while the photo is
    /// still in a gallery.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
