pub mod classified;
pub mod config;
pub mod decode;
pub mod vcloud_client;

pub use classified::{ClassifiedError, ErrorKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Classified(#[from] classified::ClassifiedError),

    #[error(transparent)]
    Client(#[from] vcloud_client::VCloudClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Model(#[from] models::ModelError),
}
