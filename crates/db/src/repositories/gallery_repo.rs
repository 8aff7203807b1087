//! Repository for the `galleries` table.

use sqlx::PgConnection;
use studio_core::scope::Scope;
use studio_core::types::DbId;

use crate::models::gallery::{CreateGallery, Gallery, UpdateGallery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, photographer_id, client_id, created_at";

/// Owner and assignee columns used when rendering a [`Scope`].
const OWNER_COLUMN: &str = "photographer_id";
const ASSIGNEE_COLUMN: &str = "client_id";

/// Provides CRUD operations for galleries.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a new gallery, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateGallery,
    ) -> Result<Gallery, sqlx::Error> {
        let query = format!(
            "INSERT INTO galleries (name, description, photographer_id, client_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gallery>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.photographer_id)
            .bind(input.client_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a gallery by its internal ID, regardless of who may see it.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Gallery>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM galleries WHERE id = $1");
        sqlx::query_as::<_, Gallery>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a gallery by ID within `scope`. Out-of-scope rows come back as `None`.
    pub async fn find_by_id_scoped(
        conn: &mut PgConnection,
        id: DbId,
        scope: &Scope,
    ) -> Result<Option<Gallery>, sqlx::Error> {
        let (filter, bound) = scope.filter(OWNER_COLUMN, Some(ASSIGNEE_COLUMN), 2);
        let query = format!("SELECT {COLUMNS} FROM galleries WHERE id = $1 AND {filter}");
        let mut q = sqlx::query_as::<_, Gallery>(&query).bind(id);
        if let Some(value) = bound {
            q = q.bind(value);
        }
        q.fetch_optional(&mut *conn).await
    }

    /// List galleries visible under `scope`, ordered by ID.
    pub async fn list(conn: &mut PgConnection, scope: &Scope) -> Result<Vec<Gallery>, sqlx::Error> {
        let (filter, bound) = scope.filter(OWNER_COLUMN, Some(ASSIGNEE_COLUMN), 1);
        let query = format!("SELECT {COLUMNS} FROM galleries WHERE {filter} ORDER BY id");
        let mut q = sqlx::query_as::<_, Gallery>(&query);
        if let Some(value) = bound {
            q = q.bind(value);
        }
        q.fetch_all(&mut *conn).await
    }

    /// Update a gallery. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateGallery,
    ) -> Result<Option<Gallery>, sqlx::Error> {
        let query = format!(
            "UPDATE galleries SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                client_id = CASE WHEN $4 THEN $5 ELSE client_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gallery>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.client_id.is_some())
            .bind(input.client_id.flatten())
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a gallery by ID. Its photo associations go with it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM galleries WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
