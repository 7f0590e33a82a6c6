use crate::error::model_error::ModelError;
use crate::http::method::HttpMethod;

use common::ErrorLocation;

use std::borrow::Cow;
use std::panic::Location;

use percent_encoding::percent_decode_str;
use url::Url;

/// An outgoing request as seen by error handlers: method and endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    endpoint: Url,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, endpoint: Url) -> Self {
        Self { method, endpoint }
    }

    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Decoded path component of the endpoint, e.g. `/api/v1.0/vApp/vm-42`.
    ///
    /// Escapes are decoded; invalid UTF-8 is replaced rather than rejected.
    pub fn path(&self) -> Cow<'_, str> {
        percent_decode_str(self.endpoint.path()).decode_utf8_lossy()
    }

    /// `GET https://host/api/v1.0/vApp/1 HTTP/1.1`
    pub fn request_line(&self) -> String {
        format!("{} {} HTTP/1.1", self.method, self.endpoint)
    }
}

/// Builder for creating validated HttpRequest instances.
#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    method: Option<HttpMethod>,
    endpoint: Option<String>,
}

impl HttpRequestBuilder {
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build the HttpRequest with validation.
    #[track_caller]
    pub fn build(self) -> Result<HttpRequest, ModelError> {
        let method = self.method.ok_or_else(|| ModelError::Validation {
            message: String::from("HTTP method is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let endpoint = self.endpoint.ok_or_else(|| ModelError::Validation {
            message: String::from("Endpoint is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if endpoint.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Endpoint cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let endpoint = Url::parse(&endpoint).map_err(|e| ModelError::Validation {
            message: format!("Invalid endpoint {endpoint}: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ModelError::Validation {
                message: format!("Unsupported endpoint scheme: {}", endpoint.scheme()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(HttpRequest { method, endpoint })
    }
}
