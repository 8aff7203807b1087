//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// GET    /users        -> list_users
/// POST   /users        -> create_user
/// GET    /users/me     -> get_me
/// GET    /users/{id}   -> get_user
/// PUT    /users/{id}   -> update_user
/// DELETE /users/{id}   -> delete_user
/// ```
///
/// The collection also answers with a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/", get(users::list_users).post(users::create_user))
        .route("/users/me", get(users::get_me))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
