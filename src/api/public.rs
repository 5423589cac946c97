//! Public API types

use anyhow::anyhow;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

// Errors

pub struct ApiError {
    status: StatusCode,
    message: Option<&'static str>,
    error: anyhow::Error,
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: None,
            error: anyhow!(message.into()),
        }
    }

    /// Attach a summary shown next to the error detail
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        if self.status.is_server_error() {
            tracing::error!("{:#}", self.error);
        } else {
            tracing::warn!("{:#}", self.error);
        }

        let body = ErrorBody {
            message: self.message,
            error: format!("{:#}", self.error),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
            error: err.into(),
        }
    }
}

// Re-export public types from each route

pub mod meetings {
    pub use crate::api::routes::meetings::public::*;
}
