//! HTTP client for the Bexio REST API.
//!
//! Composes request URLs against the configured origin, attaches bearer
//! authentication and JSON negotiation headers, and hands the request to the
//! configured transport. Responses come back untouched: no status checks,
//! no retries, no decoding.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Body, Method, Request, Response, Url};
use tracing::debug;

use bexio_core::config::ClientConfig;
use bexio_core::constants::{self, headers};
use bexio_core::error::{BexioError, BexioResult};

use crate::options::{self, ClientOption};
use crate::request::{ApiRequest, RequestContext};
use crate::transport::{self, ReqwestTransport, Transport};

/// Client for the Bexio API.
///
/// Holds only immutable configuration and a shared transport handle, so it
/// is cheap to clone and safe to use from many tasks at once.
#[derive(Clone)]
pub struct ApiClient {
    /// API origin including the version prefix.
    base_url: String,
    /// Bearer token. Validated when a request is built, not here.
    token: String,
    /// `None` falls back to the process-wide default transport.
    transport: Option<Arc<dyn Transport>>,
    /// Empty means no `User-Agent` header.
    user_agent: String,
}

impl ApiClient {
    /// Create a client with the default origin, then apply `options` in
    /// order. Never fails; an empty token is only rejected when a request is
    /// built. Without a transport option the client uses the shared default
    /// transport, created on first use.
    pub fn new(
        token: impl Into<String>,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Self {
        let mut client = Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            transport: None,
            user_agent: String::new(),
        };
        for option in options {
            client.apply(option);
        }
        client
    }

    /// Create a client from configuration, building a reqwest transport with
    /// the configured timeouts.
    pub fn from_config(config: &ClientConfig) -> BexioResult<Self> {
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(
            config.token.clone(),
            [
                options::with_base_url(ClientConfig::sanitize_base_url(&config.base_url)),
                options::with_transport(Arc::new(transport)),
                options::with_user_agent(config.user_agent.clone()),
            ],
        ))
    }

    fn apply(&mut self, option: ClientOption) {
        match option {
            ClientOption::BaseUrl(url) => self.base_url = url,
            ClientOption::Transport(transport) => self.transport = Some(transport),
            ClientOption::UserAgent(ua) => self.user_agent = ua,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// The configured transport, or the shared default.
    fn transport(&self) -> BexioResult<Arc<dyn Transport>> {
        match &self.transport {
            Some(transport) => Ok(Arc::clone(transport)),
            None => transport::default_transport(),
        }
    }

    /// Join the origin and `path` with exactly one slash.
    ///
    /// One trailing slash is dropped from the origin and one leading slash
    /// from the path.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{base}/{path}")
    }

    /// Build an authenticated request without performing any I/O.
    ///
    /// The context deadline, if set, becomes the request timeout, and the
    /// context travels with the request to [`ApiClient::execute`].
    pub fn build_request(
        &self,
        ctx: &RequestContext,
        method: &str,
        path: &str,
        body: Option<Body>,
    ) -> BexioResult<ApiRequest> {
        let method = parse_method(method)?;
        check_path(path)?;
        let url = Url::parse(&self.url(path))
            .map_err(|e| BexioError::InvalidRequest(format!("invalid url for path {path:?}: {e}")))?;

        if self.token.is_empty() {
            return Err(BexioError::MissingToken);
        }

        let mut request = Request::new(method, url);
        let has_body = body.is_some();
        *request.body_mut() = body;

        let mut auth = header_value(&format!("{}{}", headers::BEARER_PREFIX, self.token))?;
        auth.set_sensitive(true);

        let request_headers = request.headers_mut();
        request_headers.insert(AUTHORIZATION, auth);
        request_headers.insert(ACCEPT, HeaderValue::from_static(headers::JSON));
        if has_body {
            request_headers.insert(CONTENT_TYPE, HeaderValue::from_static(headers::JSON));
        }
        if !self.user_agent.is_empty() {
            request_headers.insert(USER_AGENT, header_value(&self.user_agent)?);
        }

        if let Some(remaining) = ctx.remaining() {
            *request.timeout_mut() = Some(remaining);
        }

        Ok(ApiRequest::new(request, ctx.clone()))
    }

    /// Execute a built request on the configured transport.
    ///
    /// Returns the transport's response or error as-is, unless the request
    /// context is cancelled or its deadline passes first.
    pub async fn execute(&self, request: ApiRequest) -> BexioResult<Response> {
        let transport = self.transport()?;
        let (request, ctx) = request.into_parts();
        debug!("{} {}", request.method(), request.url());

        ctx.run(transport.execute(request)).await
    }

    /// Convenience: build and execute in one call.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        method: &str,
        path: &str,
        body: Option<Body>,
    ) -> BexioResult<Response> {
        let request = self.build_request(ctx, method, path, body)?;
        self.execute(request).await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Build a request on a client that may be absent.
///
/// Fails with [`BexioError::NilClient`] when `client` is `None`.
pub fn build_request(
    client: Option<&ApiClient>,
    ctx: &RequestContext,
    method: &str,
    path: &str,
    body: Option<Body>,
) -> BexioResult<ApiRequest> {
    client
        .ok_or(BexioError::NilClient)?
        .build_request(ctx, method, path, body)
}

/// Execute a request when either the client or the request may be absent.
///
/// The client is checked first. Neither check touches the transport.
pub async fn execute(
    client: Option<&ApiClient>,
    request: Option<ApiRequest>,
) -> BexioResult<Response> {
    let client = client.ok_or(BexioError::NilClient)?;
    let request = request.ok_or(BexioError::NilRequest)?;
    client.execute(request).await
}

/// An empty method means GET; anything else must be a valid HTTP token.
fn parse_method(method: &str) -> BexioResult<Method> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes())
        .map_err(|_| BexioError::InvalidRequest(format!("invalid method {method:?}")))
}

/// URL parsing resolves `.` and `..` segments (including their
/// percent-encoded forms), which would change the joined URL and could step
/// outside the versioned origin. Such paths are rejected instead.
fn check_path(path: &str) -> BexioResult<()> {
    let path_only = path.split(&['?', '#'][..]).next().unwrap_or(path);
    let has_dot_segment = path_only
        .split(|c: char| c == '/' || c == '\\')
        .map(str::to_ascii_lowercase)
        .any(|seg| matches!(seg.as_str(), "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."));
    if has_dot_segment {
        return Err(BexioError::InvalidRequest(format!(
            "path {path:?} contains a dot segment"
        )));
    }
    Ok(())
}

fn header_value(value: &str) -> BexioResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| BexioError::InvalidRequest(format!("invalid header value: {e}")))
}
