//! API error type with HTTP status and machine-readable code.
//!
//! Messages are fixed, human-readable strings; underlying causes are
//! logged by the handlers and never sent to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
}

/// API error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: &'static str,
}

impl ApiError {
    const fn new(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    pub const fn no_port_code() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "no_port_code",
            "No port_code provided, please check the URL to make sure you added the port_code path param",
        )
    }

    pub const fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not_found",
            "No port found with the specified port code",
        )
    }

    pub const fn bad_json_file() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "bad_json_file",
            "Please check your json file, it must be an object of port codes to port attributes",
        )
    }

    pub const fn no_ports_file() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "no_ports_file",
            "Expected a multipart form upload with a `ports` file field",
        )
    }

    pub const fn upload_too_large() -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "upload_too_large",
            "The ports file exceeds the upload size limit",
        )
    }

    pub const fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Please check with the administrator",
        )
    }

    pub const fn data_store() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "err_data_store",
            "Error while storing the data; please contact the administrator to check the reason of failure",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API error {} ({}): {}", self.code, self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
