//! Response bodies that are not dataset projections.

use serde::Serialize;
use utoipa::ToSchema;

/// `{ "message": ... }` body used for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Confirmation returned after a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(value_type = String, example = "Data removed")]
    pub message: &'static str,
    /// The decoded name of the removed dataset.
    pub name: String,
}
