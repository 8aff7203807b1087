//! Multi-repository operations shared by handlers.
//!
//! Service functions take a `&mut PgConnection` so the handler decides the
//! transaction boundary; they never commit.

pub mod gallery;
