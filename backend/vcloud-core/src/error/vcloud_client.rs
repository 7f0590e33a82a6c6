use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum VCloudClientError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Body Read Error: {message} {location}")]
    Body {
        message: String,
        location: ErrorLocation,
    },
}

impl VCloudClientError {
    /// Transport failures worth another attempt by the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            VCloudClientError::Http {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,
            VCloudClientError::UrlParse { .. } => false,
            VCloudClientError::Body { .. } => false,
        }
    }
}

impl From<url::ParseError> for VCloudClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        VCloudClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for VCloudClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        VCloudClientError::Http {
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
