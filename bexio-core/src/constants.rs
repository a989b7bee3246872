//! Application-wide constants.

/// Application name, used for the config directory and log file names.
pub const APP_NAME: &str = "Bexio";

/// Default API origin, including the version prefix.
pub const DEFAULT_BASE_URL: &str = "https://api.bexio.com/3.0";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default connect timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 15_000;

/// Header values set on every request.
pub mod headers {
    /// Media type sent in `Accept`, and in `Content-Type` when a body is present.
    pub const JSON: &str = "application/json";

    /// Scheme prefix of the `Authorization` header.
    pub const BEARER_PREFIX: &str = "Bearer ";
}
