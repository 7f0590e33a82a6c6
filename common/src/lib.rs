//! Shared building blocks for the vCloud workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking and status helpers
//! - **models**: Pure data structures describing an HTTP exchange
//! - **vcloud-core**: Error classification and transport
//! - **vcloud-classify**: Command line wiring everything together

pub mod error;
pub mod http_status;


pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;
