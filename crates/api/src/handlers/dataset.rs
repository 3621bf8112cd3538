//! Handlers for the dataset catalog.
//!
//! Each handler is one lookup plus at most one write. Payloads are validated
//! before the store is touched, and every storage outcome is mapped to a
//! `{"message": ...}` response by [`AppError`].

use axum::extract::State;
use axum::Json;
use datacontrol_core::dataset::{parse_dataset, DatasetPayload};
use datacontrol_core::encoding::decode_twice;
use datacontrol_core::error::CoreError;
use datacontrol_db::models::dataset::{DatasetList, DatasetView};
use datacontrol_db::repositories::DatasetRepo;

use crate::error::{AppError, AppResult, MSG_NOT_FOUND};
use crate::extract::DatasetBody;
use crate::query::{AreaParams, NameParams, ValidQuery};
use crate::response::{DeletedResponse, MessageResponse};
use crate::state::AppState;

fn not_found(name: &str) -> AppError {
    tracing::warn!(name, "Dataset not found");
    AppError::Core(CoreError::NotFound(MSG_NOT_FOUND.to_string()))
}

/// POST /data
///
/// Validate and store a new dataset record.
#[utoipa::path(
    post,
    path = "/data",
    tag = "Data",
    request_body(
        content = DatasetPayload,
        description = "JSON object, or the same fields as an HTML form",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Stored dataset", body = DatasetView),
        (status = 400, description = "Invalid payload or save failure", body = MessageResponse),
        (status = 409, description = "Name already in use", body = MessageResponse)
    )
)]
pub async fn add_data(
    State(state): State<AppState>,
    DatasetBody(body): DatasetBody,
) -> AppResult<Json<DatasetView>> {
    let draft = parse_dataset(&body)?;
    tracing::debug!(name = %draft.name, "Adding dataset");

    let row = DatasetRepo::insert(&state.pool, &draft)
        .await
        .map_err(|e| AppError::from_save(e, &draft.name))?;

    tracing::info!(id = row.id, name = %row.name, "Dataset added");

    Ok(Json(DatasetView::from(&row)))
}

/// GET /dataset
///
/// List every stored dataset. An empty catalog is not an error.
#[utoipa::path(
    get,
    path = "/dataset",
    tag = "Data",
    responses((status = 200, description = "Every dataset, oldest first", body = DatasetList))
)]
pub async fn list_datasets(State(state): State<AppState>) -> AppResult<Json<DatasetList>> {
    let rows = DatasetRepo::list(&state.pool).await?;

    tracing::debug!(count = rows.len(), "Listed datasets");

    Ok(Json(DatasetList::from(rows.as_slice())))
}

/// GET /data?name=
///
/// Retrieve a single dataset by exact name.
#[utoipa::path(
    get,
    path = "/data",
    tag = "Data",
    params(NameParams),
    responses(
        (status = 200, description = "Dataset", body = DatasetView),
        (status = 400, description = "Missing name parameter", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_data(
    State(state): State<AppState>,
    ValidQuery(NameParams { name }): ValidQuery<NameParams>,
) -> AppResult<Json<DatasetView>> {
    let row = DatasetRepo::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| not_found(&name))?;

    Ok(Json(DatasetView::from(&row)))
}

/// GET /area?area=
///
/// List datasets whose area matches exactly. No match is a 404.
#[utoipa::path(
    get,
    path = "/area",
    tag = "Data",
    params(AreaParams),
    responses(
        (status = 200, description = "Datasets in the area", body = DatasetList),
        (status = 400, description = "Missing area parameter", body = MessageResponse),
        (status = 404, description = "No datasets for the area", body = MessageResponse)
    )
)]
pub async fn find_by_area(
    State(state): State<AppState>,
    ValidQuery(AreaParams { area }): ValidQuery<AreaParams>,
) -> AppResult<Json<DatasetList>> {
    let rows = DatasetRepo::find_by_area(&state.pool, &area).await?;

    if rows.is_empty() {
        tracing::warn!(area = %area, "No datasets for area");
        return Err(AppError::Core(CoreError::NotFound(format!(
            "No data found for area '{area}'"
        ))));
    }

    tracing::debug!(area = %area, count = rows.len(), "Found datasets for area");

    Ok(Json(DatasetList::from(rows.as_slice())))
}

/// PATCH /data?name=
///
/// Refresh `check_date` without changing any other field.
#[utoipa::path(
    patch,
    path = "/data",
    tag = "Data",
    params(NameParams),
    responses(
        (status = 200, description = "Checked dataset", body = DatasetView),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn touch_data(
    State(state): State<AppState>,
    ValidQuery(NameParams { name }): ValidQuery<NameParams>,
) -> AppResult<Json<DatasetView>> {
    let row = DatasetRepo::touch(&state.pool, &name)
        .await?
        .ok_or_else(|| not_found(&name))?;

    tracing::info!(id = row.id, name = %row.name, check_date = %row.check_date, "Dataset checked");

    Ok(Json(DatasetView::from(&row)))
}

/// PUT /data?name=
///
/// Replace every field of an existing dataset with a new payload.
#[utoipa::path(
    put,
    path = "/data",
    tag = "Data",
    params(NameParams),
    request_body(
        content = DatasetPayload,
        description = "JSON object, or the same fields as an HTML form",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Updated dataset", body = DatasetView),
        (status = 400, description = "Invalid payload or save failure", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Name already in use", body = MessageResponse)
    )
)]
pub async fn update_data(
    State(state): State<AppState>,
    ValidQuery(NameParams { name }): ValidQuery<NameParams>,
    DatasetBody(body): DatasetBody,
) -> AppResult<Json<DatasetView>> {
    // A missing record is reported before a bad payload. `replace` locks and
    // re-checks the row, so a delete in between still ends in a 404.
    if DatasetRepo::find_by_name(&state.pool, &name).await?.is_none() {
        return Err(not_found(&name));
    }

    let draft = parse_dataset(&body)?;

    let row = DatasetRepo::replace(&state.pool, &name, &draft)
        .await
        .map_err(|e| AppError::from_save(e, &draft.name))?
        .ok_or_else(|| not_found(&name))?;

    tracing::info!(id = row.id, from = %name, to = %row.name, "Dataset updated");

    Ok(Json(DatasetView::from(&row)))
}

/// DELETE /data?name=
///
/// Remove a dataset. The name is percent-decoded twice more after the
/// query string itself is decoded.
#[utoipa::path(
    delete,
    path = "/data",
    tag = "Data",
    params(NameParams),
    responses(
        (status = 200, description = "Removed", body = DeletedResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn delete_data(
    State(state): State<AppState>,
    ValidQuery(NameParams { name }): ValidQuery<NameParams>,
) -> AppResult<Json<DeletedResponse>> {
    let name = decode_twice(&name);

    let removed = DatasetRepo::delete_by_name(&state.pool, &name).await?;
    if removed == 0 {
        return Err(not_found(&name));
    }

    tracing::info!(name = %name, "Dataset removed");

    Ok(Json(DeletedResponse {
        message: "Data removed",
        name,
    }))
}
