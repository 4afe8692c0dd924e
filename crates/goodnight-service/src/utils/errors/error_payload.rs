use serde::Serialize;
use utoipa::ToSchema;

/// The API error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorPayload {
    /// The error category
    pub error: String,
    /// The human-readable error message
    pub message: String,
}
