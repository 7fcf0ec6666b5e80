//! REST access to the publishing backend.

pub mod client;
pub mod endpoints;
pub mod http;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;
pub use http::HttpTransport;
pub use transport::{ApiRequest, ApiResponse, Body, FilePart, Form, Method, Part, Transport};
