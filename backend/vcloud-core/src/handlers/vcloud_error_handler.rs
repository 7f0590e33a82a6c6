//! Classification of failed vCloud responses.
//!
//! The handler resolves a message from the response payload, then lets the
//! status code pick the outcome:
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 400 | `Conflict` for a `BUSY_ENTITY` error document, `InvalidArgument` otherwise |
//! | 401, 403 | `Authorization` |
//! | 404 (not DELETE) | `ResourceNotFound` |
//! | anything else | the payload-derived outcome |

use crate::command::HttpCommand;
use crate::decoder::{ErrorDecoder, XmlErrorDecoder};
use crate::error::classified::ClassifiedError;
use crate::handlers::HttpErrorHandler;
use crate::handlers::resource_path::not_found_message;

use models::{HttpMethod, HttpRequest, HttpResponse, Payload, VCloudError, media_type};

use bytes::Bytes;
use log::{debug, trace};

/// Maps failed vCloud responses to [`ClassifiedError`] outcomes.
#[derive(Debug, Clone)]
pub struct VCloudErrorHandler<D = XmlErrorDecoder> {
    decoder: D,
    error_media_type: String,
}

impl Default for VCloudErrorHandler<XmlErrorDecoder> {
    fn default() -> Self {
        Self::new(XmlErrorDecoder::new())
    }
}

impl<D: ErrorDecoder> VCloudErrorHandler<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            error_media_type: media_type::ERROR_XML.to_string(),
        }
    }

    /// Content type that marks a structured error body.
    pub fn with_error_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.error_media_type = media_type.into();
        self
    }

    pub fn error_media_type(&self) -> &str {
        &self.error_media_type
    }

    /// Classify a failed exchange.
    ///
    /// The response payload is released before this returns, whichever
    /// branch was taken. If classification unwinds, dropping the payload
    /// releases it instead.
    pub fn classify(&self, request: &HttpRequest, response: &mut HttpResponse) -> ClassifiedError {
        let outcome = self.classify_response(request, response);
        response.release_payload();

        debug!(
            "Classified {} -> {} as {} ({})",
            request.request_line(),
            response.status_line(),
            outcome.kind(),
            outcome.message()
        );

        outcome
    }

    fn classify_response(&self, request: &HttpRequest, response: &mut HttpResponse) -> ClassifiedError {
        let status = response.status();
        let mut message = format!("{} -> {}", request.request_line(), response.status_line());
        let mut outcome = ClassifiedError::http_response(request, status, message.clone());
        let mut decoded: Option<VCloudError> = None;

        if let Some(payload) = response.payload_mut() {
            if payload.content_metadata().is(&self.error_media_type) {
                decoded = read_body(payload).and_then(|body| self.decoder.decode(request, &body));

                if let Some(error) = decoded.as_ref().filter(|e| !e.message.is_empty()) {
                    message = error.message.clone();
                    outcome = ClassifiedError::vcloud_response(request, status, error.clone());
                }
            } else if let Some(text) = read_text(payload) {
                message = text;
                outcome = ClassifiedError::http_response(request, status, message.clone());
            }
        }

        match status.as_u16() {
            400 => {
                if decoded.as_ref().is_some_and(VCloudError::is_busy_entity) {
                    ClassifiedError::conflict(message, outcome)
                } else {
                    ClassifiedError::invalid_argument(message, outcome)
                }
            }
            // Only the message survives; the earlier outcome is dropped.
            401 | 403 => ClassifiedError::authorization(outcome.message(), status),
            404 if request.method() != HttpMethod::Delete => {
                ClassifiedError::resource_not_found(not_found_message(&request.path()))
            }
            _ => outcome,
        }
    }
}

impl<D: ErrorDecoder> HttpErrorHandler for VCloudErrorHandler<D> {
    fn handle_error(&self, command: &mut HttpCommand, response: &mut HttpResponse) {
        let outcome = self.classify(command.request(), response);
        command.set_error(outcome);
    }
}

fn read_body(payload: &mut Payload) -> Option<Bytes> {
    payload
        .read_all()
        .inspect_err(|e| debug!("Failed to read error payload: {e}"))
        .ok()
}

fn read_text(payload: &mut Payload) -> Option<String> {
    let body = read_body(payload)?;
    let text = String::from_utf8_lossy(&body).into_owned();

    if text.is_empty() {
        trace!("Error payload is empty, keeping status line message");
        return None;
    }

    Some(text)
}
