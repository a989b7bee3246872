//! Bexio API - HTTP client foundation for the Bexio V3 REST API.
//!
//! Builds requests against a fixed origin with bearer authentication and
//! JSON content negotiation, then executes them on a pluggable transport.
//! Resource-specific endpoints are layered on top by callers; this crate
//! stops at the raw `reqwest::Response`.

pub mod client;
pub mod options;
pub mod request;
pub mod transport;

// Re-export key types
pub use client::{build_request, execute, ApiClient};
pub use options::{with_base_url, with_transport, with_user_agent, ClientOption};
pub use request::{ApiRequest, RequestContext};
pub use transport::{default_transport, ReqwestTransport, Transport};

pub use reqwest::{Body, Response};
