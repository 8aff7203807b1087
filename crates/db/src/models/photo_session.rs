//! Photo session entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `photo_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoSession {
    pub id: DbId,
    pub name: String,
    pub date: Timestamp,
    pub photographer_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a new photo session.
#[derive(Debug, Deserialize)]
pub struct CreatePhotoSession {
    pub name: String,
    pub date: Timestamp,
    pub photographer_id: DbId,
}

/// DTO for updating a photo session. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdatePhotoSession {
    pub name: Option<String>,
    pub date: Option<Timestamp>,
}
