//! Photo entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `photos` table. `path` is an opaque storage reference.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub description: String,
    pub path: String,
    pub session_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a new photo record.
#[derive(Debug)]
pub struct CreatePhoto {
    pub description: String,
    pub path: String,
    pub session_id: DbId,
}
