//! Shared response envelope for API handlers.
//!
//! Every response carries a `status` and a `message`. Successful responses
//! add a `data` payload unless there is nothing to return (e.g. delete):
//!
//! ```text
//! {"status": "OK", "message": "Success", "data": {...}}
//! {"status": "Created", "message": "Success", "data": {...}}
//! {"status": "OK", "message": "Success"}
//! ```
//!
//! Error bodies are built by [`crate::error::AppError`] with `status: "Error"`.

use serde::Serialize;

pub const STATUS_OK: &str = "OK";
pub const STATUS_CREATED: &str = "Created";
pub const STATUS_ERROR: &str = "Error";

const MESSAGE_SUCCESS: &str = "Success";

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK,
            message: MESSAGE_SUCCESS,
            data: Some(data),
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: STATUS_CREATED,
            message: MESSAGE_SUCCESS,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// `{"status": "OK", "message": "Success"}` with no payload.
    pub fn empty() -> Self {
        Self {
            status: STATUS_OK,
            message: MESSAGE_SUCCESS,
            data: None,
        }
    }
}
