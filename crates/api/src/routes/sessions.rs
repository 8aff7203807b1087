//! Route definitions for the `/sessions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// ```text
/// GET    /sessions               -> list_sessions
/// POST   /sessions               -> create_session
/// GET    /sessions/{id}          -> get_session
/// DELETE /sessions/{id}          -> delete_session
/// GET    /sessions/{id}/photos   -> list_session_photos
/// POST   /sessions/{id}/photos   -> add_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/sessions/{id}",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        .route(
            "/sessions/{id}/photos",
            get(sessions::list_session_photos).post(sessions::add_photo),
        )
}
