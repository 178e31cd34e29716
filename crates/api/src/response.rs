//! Shared response envelope for API handlers.
//!
//! Every successful response is `{ "status": true, "data": ..., "message": ... }`.
//! Failures use the same shape with `status: false` (see [`crate::error`]).

use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(rows, "News retrieved successfully")))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: true,
            data: Some(data),
            message: message.into(),
        }
    }
}
