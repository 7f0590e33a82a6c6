use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

/// Failures loading or saving `vcloud.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vcloud.toml Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vcloud.toml Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    /// Creating the directory, writing the temp file, or renaming it failed.
    #[error("vcloud.toml Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform reports no user config directory.
    #[error("No user config directory for vcloud.toml {location}")]
    DirectoryNotFound { location: ErrorLocation },

    #[error("vcloud.toml Serialize Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    /// A value is out of range: version, timeout, media type or endpoint.
    #[error("vcloud.toml Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },
}
