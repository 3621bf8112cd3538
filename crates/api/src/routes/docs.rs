use axum::routing::get;
use axum::Router;

use crate::handlers::docs;
use crate::state::AppState;

/// `GET /` redirects to `GET /openapi`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(docs::home))
        .route("/openapi", get(docs::openapi))
}
