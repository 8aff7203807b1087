//! Well-known role names and the closed [`Role`] tag set.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20250101000001_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PHOTOGRAPHER: &str = "photographer";
pub const ROLE_CLIENT: &str = "client";

/// A user's role. Access rules dispatch on this with `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Photographer,
    Client,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Photographer => ROLE_PHOTOGRAPHER,
            Role::Client => ROLE_CLIENT,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_PHOTOGRAPHER => Ok(Role::Photographer),
            ROLE_CLIENT => Ok(Role::Client),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// Checks the owner link a user row must carry for its role.
///
/// Clients always point at their photographer; admins and photographers
/// never have one.
pub fn validate_owner_link(role: Role, photographer_id: Option<DbId>) -> Result<(), CoreError> {
    match (role, photographer_id) {
        (Role::Client, Some(_)) | (Role::Admin | Role::Photographer, None) => Ok(()),
        (Role::Client, None) => Err(CoreError::Validation(
            "A client must be assigned to a photographer".into(),
        )),
        (_, Some(_)) => Err(CoreError::Validation(format!(
            "A {role} cannot be assigned to a photographer"
        ))),
    }
}
