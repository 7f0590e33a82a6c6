use common::ErrorLocation;
use models::ModelError;
use vcloud_core::error::CoreError;

use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a classification run.
///
/// The classification itself never fails; these cover building the
/// exchange from arguments and writing the report.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Classify Error: {message} {location}")]
    Classify {
        message: String,
        location: ErrorLocation,
    },

    #[error("Body File Error: {path}: {source} {location}")]
    BodyFile {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<serde_json::Error> for ClassifyError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ClassifyError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
