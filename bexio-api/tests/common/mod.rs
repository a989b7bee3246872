//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Request;
use serde_json::{json, Value};

use bexio_api::{Response, Transport};
use bexio_core::error::BexioResult;

/// Route client debug events to the test output.
pub fn init_test_logging() {
    bexio_core::logging::init_console_logging("bexio_api=debug");
}

/// What a [`StubTransport`] saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: reqwest::Method,
    pub url: String,
    pub headers: reqwest::header::HeaderMap,
    pub body: Option<Vec<u8>>,
}

enum Behavior {
    Respond { status: u16, body: &'static str },
    Fail(&'static str),
    Hang,
}

/// Transport that records every request and answers from a script.
pub struct StubTransport {
    behavior: Behavior,
    seen: Mutex<Vec<SeenRequest>>,
}

impl StubTransport {
    /// Answer every request with `status`, header `x-stub: canned`, and `body`.
    pub fn respond(status: u16, body: &'static str) -> Self {
        Self::with(Behavior::Respond { status, body })
    }

    /// Fail every request with `message`.
    pub fn failing(message: &'static str) -> Self {
        Self::with(Behavior::Fail(message))
    }

    /// Never complete.
    pub fn hanging() -> Self {
        Self::with(Behavior::Hang)
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: Request) -> BexioResult<Response> {
        self.seen.lock().unwrap().push(SeenRequest {
            method: request.method().clone(),
            url: request.url().to_string(),
            headers: request.headers().clone(),
            body: request.body().and_then(|b| b.as_bytes()).map(<[u8]>::to_vec),
        });

        match self.behavior {
            Behavior::Respond { status, body } => {
                let response = http::Response::builder()
                    .status(status)
                    .header("x-stub", "canned")
                    .body(body)
                    .unwrap();
                Ok(Response::from(response))
            }
            Behavior::Fail(message) => Err(anyhow::anyhow!(message).into()),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

/// Start a local server on an ephemeral port.
///
/// - `/slow` answers after ten seconds
/// - `/teapot` answers 418
/// - anything else echoes method, path, selected headers, and body as JSON
pub async fn spawn_echo_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/slow", get(slow))
        .route("/api/teapot", get(teapot))
        .fallback(echo);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "authorization": header("authorization"),
        "accept": header("accept"),
        "content_type": header("content-type"),
        "user_agent": header("user-agent"),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(10)).await;
    "late"
}

async fn teapot() -> (StatusCode, &'static str) {
    (StatusCode::IM_A_TEAPOT, "short and stout")
}
