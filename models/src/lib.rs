//! Domain models for vCloud error handling.
//!
//! This crate contains pure data structures describing an HTTP exchange
//! with a vCloud director and the error documents it returns. Models have
//! no classification logic - they're just data passed between layers.

pub mod error;
pub mod http;
pub mod media_type;
pub mod vcloud_error;


pub use error::model_error::ModelError;
pub use http::method::HttpMethod;
pub use http::payload::{BytesBody, ContentMetadata, Payload, PayloadBody};
pub use http::request::{HttpRequest, HttpRequestBuilder};
pub use http::response::HttpResponse;
pub use vcloud_error::{MinorCode, VCloudError};

pub use common::{ErrorLocation, HttpStatusCode};
