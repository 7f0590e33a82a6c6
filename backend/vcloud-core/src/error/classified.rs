//! Outcome of classifying a failed vCloud HTTP exchange.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from status lines)
//! - `is_retryable()` uses the variant and status code, not message content
//! - All outcomes include ErrorLocation for debugging
//! - `#[track_caller]` constructors for automatic location capture

use common::{ErrorLocation, HttpStatusCode};
use models::{HttpRequest, VCloudError};

use std::fmt;
use std::panic::Location;

use serde::Serialize;
use thiserror::Error as ThisError;

/// Coarse tag callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Http,
    InvalidArgument,
    Conflict,
    Authorization,
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Http => "http",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Authorization => "authorization",
            ErrorKind::NotFound => "not_found",
        };
        f.write_str(name)
    }
}

#[derive(Debug, ThisError)]
pub enum ClassifiedError {
    #[error("HTTP Response Error: {message} {location}")]
    HttpResponse {
        message: String,
        request_line: String,
        status: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("vCloud Response Error: {message} {location}")]
    VCloudResponse {
        message: String,
        request_line: String,
        status: HttpStatusCode,
        error: VCloudError,
        location: ErrorLocation,
    },

    #[error("Invalid Argument Error: {message} {location}")]
    InvalidArgument {
        message: String,
        #[source]
        cause: Box<ClassifiedError>,
        location: ErrorLocation,
    },

    #[error("Conflict Error: {message} {location}")]
    Conflict {
        message: String,
        #[source]
        cause: Box<ClassifiedError>,
        location: ErrorLocation,
    },

    #[error("Authorization Error: {message} {location}")]
    Authorization {
        message: String,
        status: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Resource Not Found Error: {message} {location}")]
    ResourceNotFound {
        message: String,
        location: ErrorLocation,
    },
}

impl ClassifiedError {
    #[track_caller]
    pub fn http_response(
        request: &HttpRequest,
        status: HttpStatusCode,
        message: impl Into<String>,
    ) -> Self {
        ClassifiedError::HttpResponse {
            message: message.into(),
            request_line: request.request_line(),
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Outcome carrying a decoded vCloud error; its message is the error's message.
    #[track_caller]
    pub fn vcloud_response(request: &HttpRequest, status: HttpStatusCode, error: VCloudError) -> Self {
        ClassifiedError::VCloudResponse {
            message: error.message.clone(),
            request_line: request.request_line(),
            status,
            error,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>, cause: ClassifiedError) -> Self {
        ClassifiedError::InvalidArgument {
            message: message.into(),
            cause: Box::new(cause),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict(message: impl Into<String>, cause: ClassifiedError) -> Self {
        ClassifiedError::Conflict {
            message: message.into(),
            cause: Box::new(cause),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn authorization(message: impl Into<String>, status: HttpStatusCode) -> Self {
        ClassifiedError::Authorization {
            message: message.into(),
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        ClassifiedError::ResourceNotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifiedError::HttpResponse { .. } | ClassifiedError::VCloudResponse { .. } => {
                ErrorKind::Http
            }
            ClassifiedError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ClassifiedError::Conflict { .. } => ErrorKind::Conflict,
            ClassifiedError::Authorization { .. } => ErrorKind::Authorization,
            ClassifiedError::ResourceNotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// The human-readable message, without the location suffix.
    pub fn message(&self) -> &str {
        match self {
            ClassifiedError::HttpResponse { message, .. }
            | ClassifiedError::VCloudResponse { message, .. }
            | ClassifiedError::InvalidArgument { message, .. }
            | ClassifiedError::Conflict { message, .. }
            | ClassifiedError::Authorization { message, .. }
            | ClassifiedError::ResourceNotFound { message, .. } => message,
        }
    }

    pub fn location(&self) -> ErrorLocation {
        match self {
            ClassifiedError::HttpResponse { location, .. }
            | ClassifiedError::VCloudResponse { location, .. }
            | ClassifiedError::InvalidArgument { location, .. }
            | ClassifiedError::Conflict { location, .. }
            | ClassifiedError::Authorization { location, .. }
            | ClassifiedError::ResourceNotFound { location, .. } => *location,
        }
    }

    /// Wrapped earlier outcome, for the variants that keep one.
    pub fn cause(&self) -> Option<&ClassifiedError> {
        match self {
            ClassifiedError::InvalidArgument { cause, .. }
            | ClassifiedError::Conflict { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }

    /// Decoded vCloud error, searched through the cause chain.
    pub fn vcloud_error(&self) -> Option<&VCloudError> {
        match self {
            ClassifiedError::VCloudResponse { error, .. } => Some(error),
            other => other.cause().and_then(ClassifiedError::vcloud_error),
        }
    }

    /// Get HTTP status code if known.
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            ClassifiedError::HttpResponse { status, .. }
            | ClassifiedError::VCloudResponse { status, .. }
            | ClassifiedError::Authorization { status, .. } => Some(*status),
            ClassifiedError::ResourceNotFound { .. } => Some(HttpStatusCode::NOT_FOUND),
            ClassifiedError::InvalidArgument { cause, .. }
            | ClassifiedError::Conflict { cause, .. } => cause.status_code(),
        }
    }

    /// Check if this outcome is retryable based on its category, NOT string content.
    pub fn is_retryable(&self) -> bool {
        match self {
            // Busy entities settle once the running task completes
            ClassifiedError::Conflict { .. } => true,

            ClassifiedError::HttpResponse { status, .. }
            | ClassifiedError::VCloudResponse { status, .. } => status.is_retryable(),

            ClassifiedError::InvalidArgument { .. } => false,
            ClassifiedError::Authorization { .. } => false,
            ClassifiedError::ResourceNotFound { .. } => false,
        }
    }

    /// Get error category for logs and metrics.
    pub fn error_category(&self) -> &'static str {
        match self {
            ClassifiedError::HttpResponse { status, .. }
            | ClassifiedError::VCloudResponse { status, .. }
                if status.is_server_error() =>
            {
                "server_error"
            }
            ClassifiedError::HttpResponse { status, .. }
            | ClassifiedError::VCloudResponse { status, .. }
                if status.is_client_error() =>
            {
                "client_error"
            }
            ClassifiedError::HttpResponse { .. } | ClassifiedError::VCloudResponse { .. } => {
                "http"
            }
            ClassifiedError::InvalidArgument { .. } => "invalid_argument",
            ClassifiedError::Conflict { .. } => "busy_entity",
            ClassifiedError::Authorization { .. } => "authorization",
            ClassifiedError::ResourceNotFound { .. } => "not_found",
        }
    }
}
