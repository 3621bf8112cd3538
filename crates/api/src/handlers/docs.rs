//! Root redirect and the machine-readable API description.

use axum::response::Redirect;
use axum::Json;
use datacontrol_core::dataset::DatasetPayload;
use datacontrol_db::models::dataset::{DatasetEntry, DatasetList, DatasetView};
use utoipa::OpenApi;

use crate::response::{DeletedResponse, MessageResponse};
use crate::routes::health::HealthResponse;

/// OpenAPI 3 description of every route, generated from the handler annotations.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DataControl API",
        description = "Catalog of geospatial datasets: add, view, check, update and remove records."
    ),
    paths(
        crate::handlers::dataset::add_data,
        crate::handlers::dataset::get_data,
        crate::handlers::dataset::update_data,
        crate::handlers::dataset::touch_data,
        crate::handlers::dataset::delete_data,
        crate::handlers::dataset::list_datasets,
        crate::handlers::dataset::find_by_area,
        crate::routes::health::health_check,
    ),
    components(schemas(
        DatasetPayload,
        DatasetView,
        DatasetEntry,
        DatasetList,
        MessageResponse,
        DeletedResponse,
        HealthResponse,
    )),
    tags(
        (name = "Data", description = "Adding, viewing and removing data"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// GET /
///
/// Send browsers to the API description.
pub async fn home() -> Redirect {
    Redirect::to("/openapi")
}

/// GET /openapi
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
