//! Domain types and pure decision logic for the studio backend.
//!
//! Nothing in this crate touches the network or the database, so the access
//! rules and gallery state transitions can be unit tested in isolation.

pub mod error;
pub mod gallery;
pub mod policy;
pub mod roles;
pub mod scope;
pub mod types;
