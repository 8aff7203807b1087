//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut PgConnection` as the first argument, so callers can run
//! them on a pooled connection or inside a request transaction.
//!
//! Lookups that honour a [`Scope`](studio_core::scope::Scope) report rows
//! outside the scope as absent, exactly like rows that do not exist.

pub mod gallery_photo_repo;
pub mod gallery_repo;
pub mod photo_repo;
pub mod photo_session_repo;
pub mod user_repo;

pub use gallery_photo_repo::GalleryPhotoRepo;
pub use gallery_repo::GalleryRepo;
pub use photo_repo::PhotoRepo;
pub use photo_session_repo::PhotoSessionRepo;
pub use user_repo::UserRepo;
