//! Repository for the `users` table. This is the identity store: token
//! subjects are resolved here on every request.

use sqlx::PgConnection;
use studio_core::scope::Scope;
use studio_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, photographer_id, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, photographer_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(input.photographer_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a user by ID within `scope`.
    ///
    /// `OwnedBy(p)` matches clients of photographer `p`; `AssignedTo(u)`
    /// matches only user `u` itself.
    pub async fn find_by_id_scoped(
        conn: &mut PgConnection,
        id: DbId,
        scope: &Scope,
    ) -> Result<Option<User>, sqlx::Error> {
        let (filter, bound) = scope.filter("photographer_id", Some("id"), 2);
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND {filter}");
        let mut q = sqlx::query_as::<_, User>(&query).bind(id);
        if let Some(value) = bound {
            q = q.bind(value);
        }
        q.fetch_optional(&mut *conn).await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List users visible under `scope`, ordered by ID.
    pub async fn list(conn: &mut PgConnection, scope: &Scope) -> Result<Vec<User>, sqlx::Error> {
        let (filter, bound) = scope.filter("photographer_id", Some("id"), 1);
        let query = format!("SELECT {COLUMNS} FROM users WHERE {filter} ORDER BY id");
        let mut q = sqlx::query_as::<_, User>(&query);
        if let Some(value) = bound {
            q = q.bind(value);
        }
        q.fetch_all(&mut *conn).await
    }

    /// Count all users.
    pub async fn count(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a user by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
