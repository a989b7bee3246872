//! Construction options for [`crate::ApiClient`].

use std::fmt;
use std::sync::Arc;

use crate::transport::Transport;

/// A single override applied on top of the client defaults.
///
/// Options are applied in the order given; a later option targeting the
/// same field replaces the earlier value.
#[derive(Clone)]
pub enum ClientOption {
    /// Replace the default API origin.
    BaseUrl(String),
    /// Replace the default reqwest transport.
    Transport(Arc<dyn Transport>),
    /// Send this `User-Agent`. Empty omits the header.
    UserAgent(String),
}

impl fmt::Debug for ClientOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseUrl(url) => f.debug_tuple("BaseUrl").field(url).finish(),
            Self::Transport(_) => f.write_str("Transport(..)"),
            Self::UserAgent(ua) => f.debug_tuple("UserAgent").field(ua).finish(),
        }
    }
}

/// Override the API origin (useful for testing against a local server).
pub fn with_base_url(url: impl Into<String>) -> ClientOption {
    ClientOption::BaseUrl(url.into())
}

/// Inject a transport. The caller keeps its own `Arc` and may share the
/// transport across clients.
pub fn with_transport(transport: Arc<dyn Transport>) -> ClientOption {
    ClientOption::Transport(transport)
}

/// Set the `User-Agent` header value.
pub fn with_user_agent(user_agent: impl Into<String>) -> ClientOption {
    ClientOption::UserAgent(user_agent.into())
}
