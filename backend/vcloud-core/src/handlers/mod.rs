pub mod resource_path;
pub mod vcloud_error_handler;

pub use vcloud_error_handler::VCloudErrorHandler;

use crate::command::HttpCommand;

use models::HttpResponse;

/// Inspects a failed response and attaches an outcome to the command.
///
/// Implementations must not fail: whatever happens while reading the
/// response, an outcome is attached and the payload is released.
pub trait HttpErrorHandler: Send + Sync {
    fn handle_error(&self, command: &mut HttpCommand, response: &mut HttpResponse);
}
