use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use service::errors::ServiceError;

/// Wire shape for client-facing 404/400 errors.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

/// Client-facing API failure. Not-found and bad-request carry the request
/// path; anything unexpected surfaces as a plain 500 with the raw message.
#[derive(Debug)]
pub enum ApiError {
    NotFound { message: String, path: String },
    BadRequest { message: String, path: String },
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>, path: &str) -> Self {
        Self::NotFound { message: message.into(), path: path.to_string() }
    }

    pub fn bad_request(message: impl Into<String>, path: &str) -> Self {
        Self::BadRequest { message: message.into(), path: path.to_string() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Map a service failure onto the wire, echoing the request path.
    pub fn from_service(err: ServiceError, path: &str) -> Self {
        match err {
            ServiceError::NotFound(msg) => Self::not_found(msg, path),
            ServiceError::Validation(msg) => Self::bad_request(msg, path),
            ServiceError::Db(msg) => Self::internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { message, path } => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    error: "Customer Not Found".into(),
                    message,
                    path,
                }),
            )
                .into_response(),
            ApiError::BadRequest { message, path } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    error: "Bad Request".into(),
                    message,
                    path,
                }),
            )
                .into_response(),
            ApiError::Internal { message } => {
                error!(error = %message, "unhandled failure");
                // Failure text goes to the client verbatim
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", message)).into_response()
            }
        }
    }
}
