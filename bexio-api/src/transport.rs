//! Pluggable HTTP execution.
//!
//! The client never talks to the network directly. It hands a fully built
//! `reqwest::Request` to a [`Transport`] and returns whatever comes back.
//! [`ReqwestTransport`] is the default; tests substitute stubs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::{Client, Request, Response};

use bexio_core::config::ClientConfig;
use bexio_core::error::{BexioError, BexioResult};

/// Capability that performs the network I/O for a request.
///
/// Implementations must be shareable across tasks; the client holds them
/// behind an `Arc` and may be cloned freely.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response or the transport failure.
    async fn execute(&self, request: Request) -> BexioResult<Response>;
}

/// Default transport backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Wrap an existing reqwest client (custom TLS, proxies, tracing, ...).
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }

    /// Build a reqwest client with the timeouts from configuration.
    pub fn from_config(config: &ClientConfig) -> BexioResult<Self> {
        let inner = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| BexioError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { inner })
    }
}

lazy_static! {
    /// Built once and shared by every client constructed without a transport.
    static ref DEFAULT_TRANSPORT: Result<Arc<dyn Transport>, String> = Client::builder()
        .build()
        .map(|inner| Arc::new(ReqwestTransport::new(inner)) as Arc<dyn Transport>)
        .map_err(|e| e.to_string());
}

/// The process-wide default transport.
///
/// Fails only if the TLS backend could not be initialised.
pub fn default_transport() -> BexioResult<Arc<dyn Transport>> {
    DEFAULT_TRANSPORT
        .clone()
        .map_err(|e| BexioError::Config(format!("failed to build default HTTP client: {e}")))
}

impl From<Client> for ReqwestTransport {
    fn from(inner: Client) -> Self {
        Self::new(inner)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> BexioResult<Response> {
        Ok(self.inner.execute(request).await?)
    }
}
