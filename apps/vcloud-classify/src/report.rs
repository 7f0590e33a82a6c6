use vcloud_core::{ClassifiedError, ErrorKind};

use serde::Serialize;

/// JSON view of a [`ClassifiedError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
    pub category: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_error_code: Option<String>,

    /// Message of the wrapped outcome, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl From<&ClassifiedError> for ClassificationReport {
    fn from(outcome: &ClassifiedError) -> Self {
        Self {
            kind: outcome.kind(),
            message: outcome.message().to_string(),
            retryable: outcome.is_retryable(),
            category: outcome.error_category(),
            status: outcome.status_code().map(|status| status.as_u16()),
            minor_error_code: outcome
                .vcloud_error()
                .and_then(|error| error.minor_error_code.as_ref())
                .map(|minor| minor.as_str().to_string()),
            cause: outcome.cause().map(|cause| cause.message().to_string()),
        }
    }
}

impl ClassificationReport {
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
