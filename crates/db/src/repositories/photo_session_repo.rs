//! Repository for the `photo_sessions` table.

use sqlx::PgConnection;
use studio_core::scope::Scope;
use studio_core::types::DbId;

use crate::models::photo_session::{CreatePhotoSession, PhotoSession, UpdatePhotoSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, date, photographer_id, created_at";

/// Provides CRUD operations for photo sessions.
pub struct PhotoSessionRepo;

impl PhotoSessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreatePhotoSession,
    ) -> Result<PhotoSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO photo_sessions (name, date, photographer_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoSession>(&query)
            .bind(&input.name)
            .bind(input.date)
            .bind(input.photographer_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a session by ID within `scope`. Sessions have no assignee, so an
    /// `AssignedTo` scope never matches.
    pub async fn find_by_id_scoped(
        conn: &mut PgConnection,
        id: DbId,
        scope: &Scope,
    ) -> Result<Option<PhotoSession>, sqlx::Error> {
        let (filter, bound) = scope.filter("photographer_id", None, 2);
        let query = format!("SELECT {COLUMNS} FROM photo_sessions WHERE id = $1 AND {filter}");
        let mut q = sqlx::query_as::<_, PhotoSession>(&query).bind(id);
        if let Some(value) = bound {
            q = q.bind(value);
        }
        q.fetch_optional(&mut *conn).await
    }

    /// List sessions visible under `scope`, most recent session date first.
    pub async fn list(
        conn: &mut PgConnection,
        scope: &Scope,
    ) -> Result<Vec<PhotoSession>, sqlx::Error> {
        let (filter, bound) = scope.filter("photographer_id", None, 1);
        let query =
            format!("SELECT {COLUMNS} FROM photo_sessions WHERE {filter} ORDER BY date DESC, id");
        let mut q = sqlx::query_as::<_, PhotoSession>(&query);
        if let Some(value) = bound {
            q = q.bind(value);
        }
        q.fetch_all(&mut *conn).await
    }

    /// Update a session. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdatePhotoSession,
    ) -> Result<Option<PhotoSession>, sqlx::Error> {
        let query = format!(
            "UPDATE photo_sessions SET
                name = COALESCE($2, name),
                date = COALESCE($3, date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoSession>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.date)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a session and its photos. Fails with a foreign key violation
    /// while any of its photos is still in a gallery.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photo_sessions WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
