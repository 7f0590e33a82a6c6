use crate::command::HttpCommand;
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::error::classified::ClassifiedError;
use crate::error::vcloud_client::VCloudClientError;
use crate::handlers::{HttpErrorHandler, VCloudErrorHandler};

use common::{ErrorLocation, HttpStatusCode};
use models::{BytesBody, ContentMetadata, HttpMethod, HttpRequest, HttpResponse, Payload};

use std::panic::Location;
use std::sync::Arc;

use bytes::Bytes;
use log::{debug, trace};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use url::Url;

/// Single-shot vCloud transport.
///
/// Sends one request, returns the body of a 2xx response, and runs every
/// other response through the configured [`HttpErrorHandler`].
#[derive(Clone)]
pub struct VCloudClient {
    base_url: Option<Url>,
    client: Client,
    handler: Arc<dyn HttpErrorHandler>,
}

impl VCloudClient {
    pub fn new(config: &ClientConfig) -> Result<Self, VCloudClientError> {
        let base_url = config.endpoint.as_deref().map(Url::parse).transpose()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        let handler =
            VCloudErrorHandler::default().with_error_media_type(config.error_media_type.as_str());

        Ok(Self {
            base_url,
            client,
            handler: Arc::new(handler),
        })
    }

    /// Replace the error handler.
    pub fn with_handler(mut self, handler: impl HttpErrorHandler + 'static) -> Self {
        self.handler = Arc::new(handler);
        self
    }

    /// Build a request for `path`, resolved against the configured endpoint.
    ///
    /// Absolute URLs are used as-is.
    #[track_caller]
    pub fn request(&self, method: HttpMethod, path: &str) -> Result<HttpRequest, VCloudClientError> {
        let endpoint = match &self.base_url {
            Some(base) => base.join(path)?,
            None => Url::parse(path)?,
        };
        Ok(HttpRequest::new(method, endpoint))
    }

    /// Execute `request` once.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Client`] when the request cannot be sent
    /// - [`CoreError::Classified`] for any non-2xx response
    pub async fn execute(&self, request: HttpRequest) -> Result<Bytes, CoreError> {
        let response = self.send(&request).await?;
        let status = HttpStatusCode(response.status().as_u16());

        if status.is_success() {
            trace!("{} -> {status}", request.request_line());
            return Ok(self.read_success_body(response).await?);
        }

        let mut failed = into_http_response(response).await;
        let mut command = HttpCommand::new(request);
        self.handler.handle_error(&mut command, &mut failed);

        let outcome = match command.take_error() {
            Some(outcome) => outcome,
            None => ClassifiedError::http_response(
                command.request(),
                status,
                format!("{} -> {}", command.request().request_line(), failed.status_line()),
            ),
        };

        Err(CoreError::Classified(outcome))
    }

    async fn send(&self, request: &HttpRequest) -> Result<reqwest::Response, VCloudClientError> {
        debug!("Sending {}", request.request_line());
        let response = self
            .client
            .request(to_reqwest_method(request.method()), request.endpoint().clone())
            .send()
            .await?;
        Ok(response)
    }

    async fn read_success_body(&self, response: reqwest::Response) -> Result<Bytes, VCloudClientError> {
        response
            .bytes()
            .await
            .map_err(|e| VCloudClientError::Body {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Buffer a reqwest response into an [`HttpResponse`].
///
/// A body that fails to read is treated as absent.
async fn into_http_response(response: reqwest::Response) -> HttpResponse {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let converted = HttpResponse::new(status.as_u16());

    match response.bytes().await {
        Ok(body) if !body.is_empty() => {
            let metadata = ContentMetadata {
                content_type,
                content_length: Some(body.len() as u64),
            };
            converted.with_payload(Payload::new(metadata, BytesBody::new(body)))
        }
        Ok(_) => converted,
        Err(e) => {
            debug!("Failed to read body of {status} response: {e}");
            converted
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Options => Method::OPTIONS,
    }
}
