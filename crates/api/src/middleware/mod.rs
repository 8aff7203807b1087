//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the bearer token to a stored user.
//! - [`rbac::RequirePhotographer`] -- Requires the `photographer` role.

pub mod auth;
pub mod rbac;
