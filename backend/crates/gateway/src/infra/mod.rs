//! Infrastructure Layer
//!
//! reqwest implementations of the upstream service contracts.

pub mod http;

pub use http::HttpBackend;
