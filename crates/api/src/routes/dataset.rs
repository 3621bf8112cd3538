//! Route definitions for the dataset catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::dataset;
use crate::state::AppState;

/// Catalog routes, mounted at the root.
///
/// ```text
/// POST   /data            -> add_data
/// GET    /data?name=      -> get_data
/// PUT    /data?name=      -> update_data
/// PATCH  /data?name=      -> touch_data
/// DELETE /data?name=      -> delete_data
/// GET    /dataset         -> list_datasets
/// GET    /area?area=      -> find_by_area
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/data",
            get(dataset::get_data)
                .post(dataset::add_data)
                .put(dataset::update_data)
                .patch(dataset::touch_data)
                .delete(dataset::delete_data),
        )
        .route("/dataset", get(dataset::list_datasets))
        .route("/area", get(dataset::find_by_area))
}
