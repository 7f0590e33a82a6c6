//! The in-flight command an error handler reports to.

use crate::error::classified::ClassifiedError;

use models::HttpRequest;

/// A request being executed, plus the outcome attached when it fails.
#[derive(Debug)]
pub struct HttpCommand {
    request: HttpRequest,
    error: Option<ClassifiedError>,
}

impl HttpCommand {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            error: None,
        }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Attach the classified outcome, replacing any earlier one.
    pub fn set_error(&mut self, error: ClassifiedError) {
        self.error = Some(error);
    }

    pub fn error(&self) -> Option<&ClassifiedError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<ClassifiedError> {
        self.error.take()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
