//! Request values and the context they carry.
//!
//! A [`RequestContext`] bundles an optional deadline with a cancellation
//! token. It is attached when a request is built and travels with the
//! resulting [`ApiRequest`] until it is executed.

use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Body, Method, Request, Url};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use bexio_core::error::{BexioError, BexioResult};

/// Deadline and cancellation for a single request.
///
/// Clones share the same cancellation token, so cancelling any clone
/// cancels every request built with it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl RequestContext {
    /// A context that never expires and is not cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the cancellation token, e.g. with a child of a shutdown token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, saturating at zero.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancel every request carrying this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| d <= Instant::now())
    }

    /// Drive `fut` until it completes or the context ends.
    ///
    /// Cancellation wins over the deadline, and both win over `fut` when
    /// they are already due, so an expired context never polls `fut`.
    pub(crate) async fn run<F, T>(&self, fut: F) -> BexioResult<T>
    where
        F: Future<Output = BexioResult<T>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(BexioError::Cancelled),
            _ = deadline => Err(BexioError::DeadlineExceeded),
            res = fut => res,
        }
    }
}

/// A request ready for [`crate::ApiClient::execute`].
#[derive(Debug)]
pub struct ApiRequest {
    inner: Request,
    context: RequestContext,
}

impl ApiRequest {
    pub(crate) fn new(inner: Request, context: RequestContext) -> Self {
        Self { inner, context }
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Mutable headers, for callers that need extra headers before execution.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    pub fn body(&self) -> Option<&Body> {
        self.inner.body()
    }

    /// Per-request timeout derived from the context deadline, if any.
    pub fn timeout(&self) -> Option<&Duration> {
        self.inner.timeout()
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Clone the request. Returns `None` when the body is a stream.
    pub fn try_clone(&self) -> Option<Self> {
        self.inner.try_clone().map(|inner| Self {
            inner,
            context: self.context.clone(),
        })
    }

    /// Split into the raw reqwest request and its context.
    pub fn into_parts(self) -> (Request, RequestContext) {
        (self.inner, self.context)
    }
}
