//! Decoding of structured vCloud error bodies.

use crate::error::decode::DecodeError;

use common::ErrorLocation;
use models::{HttpRequest, VCloudError};

use std::panic::Location;

use log::{trace, warn};

/// Turns a structured error body into a [`VCloudError`].
///
/// Returning `None` means "no usable error document"; the classifier then
/// falls back to the status-line message.
pub trait ErrorDecoder: Send + Sync {
    fn decode(&self, request: &HttpRequest, body: &[u8]) -> Option<VCloudError>;
}

/// Decoder for `application/vnd.vmware.vcloud.error+xml` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlErrorDecoder;

impl XmlErrorDecoder {
    pub fn new() -> Self {
        Self
    }

    #[track_caller]
    pub fn try_decode(&self, body: &[u8]) -> Result<VCloudError, DecodeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::EmptyBody {
                message: String::from("error document has no content"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(quick_xml::de::from_reader(body)?)
    }
}

impl ErrorDecoder for XmlErrorDecoder {
    fn decode(&self, request: &HttpRequest, body: &[u8]) -> Option<VCloudError> {
        match self.try_decode(body) {
            Ok(error) => {
                trace!("Decoded vCloud error for {}: {error}", request.request_line());
                Some(error)
            }
            Err(e) => {
                warn!("Failed to decode error body for {}: {e}", request.request_line());
                None
            }
        }
    }
}
