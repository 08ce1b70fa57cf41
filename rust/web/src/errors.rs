/// Error handling for the namewheel HTTP API
///
/// This module provides:
/// - The JSON error body shared by every endpoint
/// - HTTP status code mappings for wheel errors
/// - Severity-based error logging
/// - JSON bodies for rejections raised by the route filters
use namewheel_engine::errors::WheelError;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{MethodNotAllowed, UnsupportedMediaType};
use warp::reply::{self, Response};
use warp::{Rejection, Reply};

/// Standard error response format for all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "empty_entry_set")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (structured data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Client errors (4xx) - expected, normal operation
    Client,
    /// Server errors (5xx) - unexpected, needs investigation
    Server,
    /// Critical errors - shared state is unusable
    Critical,
}

/// Converts an error into an HTTP response and logs it by severity
pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        if let Some(details) = self.error_details() {
            ErrorResponse::with_details(self.error_code(), self.error_message(), details)
        } else {
            ErrorResponse::new(self.error_code(), self.error_message())
        }
    }

    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let severity = self.severity();
        let error_response = self.to_error_response();

        match severity {
            ErrorSeverity::Client => {
                tracing::info!(
                    error = %error_response.error,
                    status = status.as_u16(),
                    "client error: {}",
                    error_response.message
                );
            }
            ErrorSeverity::Server => {
                tracing::error!(
                    error = %error_response.error,
                    status = status.as_u16(),
                    "server error: {}",
                    error_response.message
                );
            }
            ErrorSeverity::Critical => {
                tracing::error!(
                    error = %error_response.error,
                    status = status.as_u16(),
                    critical = true,
                    "critical error: {}",
                    error_response.message
                );
            }
        }

        error_response.into_response(status)
    }
}

impl IntoErrorResponse for WheelError {
    fn status_code(&self) -> StatusCode {
        match self {
            WheelError::EmptyEntrySet
            | WheelError::NotIdle(_)
            | WheelError::EntriesLocked
            | WheelError::NoWinner
            | WheelError::DuplicateName(_) => StatusCode::CONFLICT,
            WheelError::EmptyName | WheelError::InvalidSetting(_) => StatusCode::BAD_REQUEST,
            WheelError::EntryNotFound(_) => StatusCode::NOT_FOUND,
            WheelError::InvalidEntryCount(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WheelError::EmptyEntrySet => "empty_entry_set",
            WheelError::InvalidEntryCount(_) => "invalid_entry_count",
            WheelError::EmptyName => "empty_name",
            WheelError::DuplicateName(_) => "duplicate_name",
            WheelError::EntryNotFound(_) => "entry_not_found",
            WheelError::EntriesLocked => "entries_locked",
            WheelError::NotIdle(_) => "not_idle",
            WheelError::NoWinner => "no_winner",
            WheelError::InvalidSetting(_) => "invalid_setting",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            WheelError::NotIdle(phase) => Some(serde_json::json!({ "phase": phase })),
            WheelError::DuplicateName(name) => Some(serde_json::json!({ "name": name })),
            WheelError::EntryNotFound(id) => Some(serde_json::json!({ "entry_id": id })),
            _ => None,
        }
    }
}

/// A request no route accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestRejection {
    NotFound,
    InvalidBody(String),
    MethodNotAllowed,
    UnsupportedMediaType,
    Unhandled(String),
}

impl RequestRejection {
    /// Body deserialization is checked first: a combined rejection also
    /// carries `MethodNotAllowed` from sibling routes on the same path.
    pub fn from_rejection(err: &Rejection) -> Self {
        if let Some(e) = err.find::<BodyDeserializeError>() {
            Self::InvalidBody(e.to_string())
        } else if err.find::<UnsupportedMediaType>().is_some() {
            Self::UnsupportedMediaType
        } else if err.find::<MethodNotAllowed>().is_some() {
            Self::MethodNotAllowed
        } else if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Unhandled(format!("{:?}", err))
        }
    }
}

impl IntoErrorResponse for RequestRejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidBody(_) => "invalid_request",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::Unhandled(_) => "internal_error",
        }
    }

    fn error_message(&self) -> String {
        match self {
            Self::NotFound => "No route matches this path".to_string(),
            Self::InvalidBody(reason) => reason.clone(),
            Self::MethodNotAllowed => "Method not allowed on this path".to_string(),
            Self::UnsupportedMediaType => "Unsupported content type".to_string(),
            Self::Unhandled(_) => "Unhandled request rejection".to_string(),
        }
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Unhandled(rejection) => Some(serde_json::json!({ "rejection": rejection })),
            _ => None,
        }
    }
}

/// Recovery filter turning every rejection into an `ErrorResponse`.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    Ok(RequestRejection::from_rejection(&err).into_http_response())
}
