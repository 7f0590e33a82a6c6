pub mod method;
pub mod payload;
pub mod request;
pub mod response;
