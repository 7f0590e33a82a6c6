//! Response payloads with release-once semantics.

use crate::media_type;

use std::fmt;
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult};

use bytes::Bytes;

/// Source of payload bytes.
///
/// `release` frees whatever the body holds (buffer, connection, file
/// handle). [`Payload`] guarantees it is called at most once.
pub trait PayloadBody: Send {
    fn read_all(&mut self) -> IoResult<Bytes>;

    fn release(&mut self);
}

/// In-memory body, already buffered by the transport.
#[derive(Debug, Default)]
pub struct BytesBody {
    bytes: Option<Bytes>,
}

impl BytesBody {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }
}

impl PayloadBody for BytesBody {
    fn read_all(&mut self) -> IoResult<Bytes> {
        self.bytes
            .clone()
            .ok_or_else(|| IoError::other("payload buffer already freed"))
    }

    fn release(&mut self) {
        self.bytes = None;
    }
}

/// Declared metadata of a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMetadata {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

impl ContentMetadata {
    /// Declared content type without parameters.
    pub fn media_type(&self) -> Option<&str> {
        self.content_type.as_deref().map(media_type::essence)
    }

    /// True when the declared content type is `media_type`.
    pub fn is(&self, media_type: &str) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|declared| media_type::matches(declared, media_type))
    }
}

pub struct Payload {
    metadata: ContentMetadata,
    body: Box<dyn PayloadBody>,
    released: bool,
}

impl Payload {
    pub fn new(metadata: ContentMetadata, body: impl PayloadBody + 'static) -> Self {
        Self {
            metadata,
            body: Box::new(body),
            released: false,
        }
    }

    pub fn from_bytes(content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let metadata = ContentMetadata {
            content_type: content_type.map(str::to_string),
            content_length: Some(bytes.len() as u64),
        };
        Self::new(metadata, BytesBody::new(bytes))
    }

    pub fn content_metadata(&self) -> &ContentMetadata {
        &self.metadata
    }

    /// Read the whole body. Fails once the payload has been released.
    pub fn read_all(&mut self) -> IoResult<Bytes> {
        if self.released {
            return Err(IoError::new(
                IoErrorKind::BrokenPipe,
                "payload already released",
            ));
        }
        self.body.read_all()
    }

    /// Release the underlying body. Only the first call reaches the body.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.body.release();
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for Payload {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("metadata", &self.metadata)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
