//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity
//!   supports partial updates

pub mod gallery;
pub mod gallery_photo;
pub mod photo;
pub mod photo_session;
pub mod user;
