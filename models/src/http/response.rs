use crate::http::payload::Payload;

use common::HttpStatusCode;

/// A completed response. The payload, if any, is owned here until released.
#[derive(Debug)]
pub struct HttpResponse {
    status: HttpStatusCode,
    reason: Option<String>,
    payload: Option<Payload>,
}

impl HttpResponse {
    pub fn new(status: impl Into<HttpStatusCode>) -> Self {
        Self {
            status: status.into(),
            reason: None,
            payload: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn status(&self) -> HttpStatusCode {
        self.status
    }

    /// Reason phrase sent by the server, or the canonical one for the code.
    pub fn reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .or_else(|| self.status.canonical_reason())
    }

    /// `HTTP/1.1 404 Not Found`
    pub fn status_line(&self) -> String {
        match self.reason() {
            Some(reason) if !reason.is_empty() => format!("HTTP/1.1 {} {reason}", self.status),
            _ => format!("HTTP/1.1 {}", self.status),
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn payload_mut(&mut self) -> Option<&mut Payload> {
        self.payload.as_mut()
    }

    /// Release the payload if present. Safe to call repeatedly.
    pub fn release_payload(&mut self) {
        if let Some(payload) = self.payload.as_mut() {
            payload.release();
        }
    }
}
