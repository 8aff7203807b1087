//! Route definitions for the `/galleries` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::galleries;
use crate::state::AppState;

/// ```text
/// POST   /galleries                                  -> create_gallery
/// GET    /galleries/me                               -> list_my_galleries
/// GET    /galleries/{id}                             -> get_gallery
/// PUT    /galleries/{id}                             -> update_gallery
/// DELETE /galleries/{id}                             -> delete_gallery
/// POST   /galleries/{id}/photos                      -> attach_photo
/// DELETE /galleries/{id}/photos/{photo_id}           -> detach_photo
/// PUT    /galleries/{id}/photos/{photo_id}/select    -> toggle_selection
/// PUT    /galleries/{id}/photos/{photo_id}/favorite  -> toggle_favorite
/// ```
///
/// `/galleries` and `/galleries/me` also answer with a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/galleries", post(galleries::create_gallery))
        .route("/galleries/", post(galleries::create_gallery))
        .route("/galleries/me", get(galleries::list_my_galleries))
        .route("/galleries/me/", get(galleries::list_my_galleries))
        .route(
            "/galleries/{id}",
            get(galleries::get_gallery)
                .put(galleries::update_gallery)
                .delete(galleries::delete_gallery),
        )
        .route("/galleries/{id}/photos", post(galleries::attach_photo))
        .route(
            "/galleries/{id}/photos/{photo_id}",
            delete(galleries::detach_photo),
        )
        .route(
            "/galleries/{id}/photos/{photo_id}/select",
            put(galleries::toggle_selection),
        )
        .route(
            "/galleries/{id}/photos/{photo_id}/favorite",
            put(galleries::toggle_favorite),
        )
}
