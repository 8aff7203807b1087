//! Route definitions for the `/photos` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// ```text
/// DELETE /photos/{id}  -> delete_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/photos/{id}", delete(photos::delete_photo))
}
