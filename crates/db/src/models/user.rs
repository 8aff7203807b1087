//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::error::CoreError;
use studio_core::policy::Resource;
use studio_core::roles::Role;
use studio_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub photographer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Parse the stored role tag.
    ///
    /// The column is CHECK-constrained, so a parse failure means the schema and
    /// the code disagree and is reported as an internal error.
    pub fn role(&self) -> Result<Role, CoreError> {
        self.role.parse().map_err(|_| {
            CoreError::Internal(format!("User {} has unknown role '{}'", self.id, self.role))
        })
    }

    /// Describe this user record to the access policy.
    pub fn as_resource(&self) -> Result<Resource, CoreError> {
        Ok(Resource::User {
            id: Some(self.id),
            role: self.role()?,
            photographer_id: self.photographer_id,
        })
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub photographer_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            photographer_id: user.photographer_id,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub photographer_id: Option<DbId>,
}

/// DTO for updating an existing user. All fields are optional.
///
/// `password_hash` must already be hashed; `None` keeps the stored hash.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
