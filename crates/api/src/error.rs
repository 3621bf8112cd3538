use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use datacontrol_core::error::CoreError;
use datacontrol_db::StoreError;

use crate::response::MessageResponse;

/// Returned when a write collides with an existing dataset name.
pub const MSG_DUPLICATE_NAME: &str = "Data has same name as one saved on the database";

/// Returned when a write fails for any reason other than a duplicate name.
pub const MSG_SAVE_FAILED: &str = "It is not possible to save new data";

/// Returned when no dataset has the requested name.
pub const MSG_NOT_FOUND: &str = "Data not found in the database";

const MSG_INTERNAL: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] to produce `{"message": ...}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `datacontrol_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure outside a write path.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map a failed insert or replace of `name` to its client-facing outcome.
    ///
    /// Duplicates become 409; everything else becomes 400 with a generic
    /// message, and the full error is logged for operators.
    pub fn from_save(err: StoreError, name: &str) -> Self {
        match err {
            StoreError::DuplicateKey { constraint } => {
                tracing::warn!(name, constraint = %constraint, "Dataset name already in use");
                AppError::Core(CoreError::Conflict(MSG_DUPLICATE_NAME.to_string()))
            }
            StoreError::Storage(e) => {
                tracing::error!(name, error = %e, "Failed to save dataset");
                AppError::BadRequest(MSG_SAVE_FAILED.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            },

            // Writes go through `from_save`; anything left is a failed read.
            AppError::Store(err) => {
                tracing::error!(error = %err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, axum::Json(MessageResponse { message })).into_response()
    }
}
