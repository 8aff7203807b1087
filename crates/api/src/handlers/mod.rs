pub mod auth;
pub mod galleries;
pub mod photos;
pub mod sessions;
pub mod users;
