//! Studio API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth, routes,
//! services) so integration tests and the binary entrypoints can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
