pub mod auth;
pub mod galleries;
pub mod health;
pub mod photos;
pub mod sessions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree. Everything is mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /token                                       login (public, form body)
///
/// /users, /users/                              list, create
/// /users/me                                    own record
/// /users/{id}                                  get, update, delete
///
/// /sessions                                    list, create
/// /sessions/{id}                               get, update, delete
/// /sessions/{id}/photos                        list, add
///
/// /photos/{id}                                 delete
///
/// /galleries, /galleries/                      create
/// /galleries/me, /galleries/me/                role-scoped list
/// /galleries/{id}                              nested view, update, delete
/// /galleries/{id}/photos                       attach
/// /galleries/{id}/photos/{photo_id}            detach
///     /select                                  toggle selected (client)
///     /favorite                                toggle favorite (client)
/// ```
///
/// `/health` lives in [`health::router`] and is merged separately.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(sessions::router())
        .merge(photos::router())
        .merge(galleries::router())
}
