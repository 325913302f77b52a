//! Mapping of every failure the service can hit onto an HTTP outcome.

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pointset_format::CodecError;
use serde::Serialize;
use triangulator::GeometryError;

/// A request outcome other than success.
#[derive(Debug)]
pub enum ApiError {
    InvalidId,
    EmptyBody,
    /// Body could not be read off the connection.
    UnreadableBody,
    PayloadTooLarge { limit: usize },
    InvalidFormat(CodecError),
    NotFound,
    Triangulation(GeometryError),
    Unavailable,
    Timeout,
    /// Never shown to the client; logged at the point of conversion.
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId
            | Self::EmptyBody
            | Self::UnreadableBody
            | Self::InvalidFormat(_)
            | Self::Triangulation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "INVALID_ID",
            Self::EmptyBody => "EMPTY_BODY",
            Self::UnreadableBody => "INVALID_BODY",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::InvalidFormat(_) => "INVALID_FORMAT",
            Self::NotFound => "NOT_FOUND",
            Self::Triangulation(_) => "TRIANGULATION_FAILED",
            Self::Unavailable => "SERVICE_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn body(&self) -> ErrorBody {
        let (message, reason) = match self {
            Self::InvalidId => ("Invalid ID format".to_owned(), None),
            Self::EmptyBody => ("Empty request body".to_owned(), None),
            Self::UnreadableBody => ("Request body could not be read".to_owned(), None),
            Self::PayloadTooLarge { limit } => {
                (format!("Payload too large (limit {limit} bytes)"), None)
            }
            Self::InvalidFormat(e) => (format!("Invalid binary format: {e}"), Some(e.code())),
            Self::NotFound => ("PointSet not found".to_owned(), None),
            Self::Triangulation(e) => (e.to_string(), Some(e.code())),
            Self::Unavailable => ("Service unavailable".to_owned(), None),
            Self::Timeout => ("Request timeout".to_owned(), None),
            Self::Internal(_) => ("Internal server error".to_owned(), None),
        };
        ErrorBody {
            code: self.code(),
            message,
            reason,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::Unavailable(detail) => {
                tracing::error!(error = %detail, "Point set store unavailable");
                Self::Unavailable
            }
            StoreError::Timeout => Self::Timeout,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(detail) => tracing::error!(error = %detail, "Internal error"),
            other => tracing::warn!(code = other.code(), "Request rejected"),
        }
        (self.status(), Json(self.body())).into_response()
    }
}
