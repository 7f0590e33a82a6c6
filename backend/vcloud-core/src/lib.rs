pub mod command;
pub mod config;
pub mod decoder;
pub mod error;
pub mod handlers;
pub mod vcloud_client;

#[cfg(test)]
mod tests;

pub use command::HttpCommand;
pub use decoder::{ErrorDecoder, XmlErrorDecoder};
pub use error::classified::{ClassifiedError, ErrorKind};
pub use handlers::{HttpErrorHandler, VCloudErrorHandler};
pub use vcloud_client::VCloudClient;

pub const VCLOUD_CORE_USER_AGENT: &str =
    const_format::concatcp!("vcloud-core/", env!("CARGO_PKG_VERSION"));
