//! Client configuration management.
//!
//! Holds the API origin, bearer token, user agent, transport timeouts, and
//! logging preferences. Configuration is persisted as TOML on disk; every
//! field has a default so partial files load cleanly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{BexioError, BexioResult};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// API client settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API origin including the version prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token. Empty until the user configures one.
    #[serde(default)]
    pub token: String,

    /// `User-Agent` header value. Empty omits the header.
    #[serde(default)]
    pub user_agent: String,

    /// Whole-request timeout enforced by the default transport, in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Connect timeout enforced by the default transport, in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses the default location.
    #[serde(default)]
    pub directory: String,

    /// Write JSON lines to the log file.
    #[serde(default)]
    pub json_output: bool,
}

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_connect_timeout() -> u64 {
    constants::DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            user_agent: String::new(),
            timeout_ms: default_timeout(),
            connect_timeout_ms: default_connect_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ClientConfig {
    /// Normalize a user-supplied base URL.
    ///
    /// Strips whitespace and surrounding quotes, adds `https://` when no
    /// scheme is given, and removes trailing slashes. An empty input falls
    /// back to the default origin.
    pub fn sanitize_base_url(url: &str) -> String {
        let trimmed = url.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return default_base_url();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}

impl AppConfig {
    /// Load configuration from the default path, or defaults if no file exists.
    pub fn load_default() -> BexioResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> BexioResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save_default(&self) -> BexioResult<()> {
        let path = Self::default_config_path()?;
        self.save_to_file(&path)
    }

    /// Save configuration to a specific file path, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> BexioResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Platform config directory joined with `Bexio/config.toml`.
    ///
    /// - Linux: `~/.config/Bexio/config.toml`
    /// - macOS: `~/Library/Application Support/Bexio/config.toml`
    /// - Windows: `%APPDATA%/Bexio/config.toml`
    pub fn default_config_path() -> BexioResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| BexioError::Config("could not determine config directory".into()))?;
        Ok(base.join(constants::APP_NAME).join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> BexioResult<PathBuf> {
        if !self.logging.directory.is_empty() {
            return Ok(PathBuf::from(&self.logging.directory));
        }
        let base = dirs::data_dir()
            .ok_or_else(|| BexioError::Config("could not determine data directory".into()))?;
        Ok(base.join(constants::APP_NAME).join("logs"))
    }

    /// Whether a token has been configured.
    pub fn is_client_configured(&self) -> bool {
        !self.client.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.client.base_url, "https://api.bexio.com/3.0");
        assert_eq!(config.client.timeout_ms, 30_000);
        assert_eq!(config.client.connect_timeout_ms, 15_000);
        assert!(config.client.user_agent.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(!config.is_client_configured());
    }

    #[test]
    fn test_sanitize_base_url() {
        assert_eq!(
            ClientConfig::sanitize_base_url("api.bexio.com/3.0/"),
            "https://api.bexio.com/3.0"
        );
        assert_eq!(
            ClientConfig::sanitize_base_url("  \"http://localhost:8080//\"  "),
            "http://localhost:8080"
        );
        assert_eq!(ClientConfig::sanitize_base_url("   "), constants::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [client]
            token = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.client.token, "secret");
        assert_eq!(config.client.base_url, constants::DEFAULT_BASE_URL);
        assert_eq!(config.logging.level, "info");
        assert!(config.is_client_configured());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.client.token = "abc".into();
        config.client.user_agent = "acme/1.0".into();
        config.logging.json_output = true;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.client.token, "abc");
        assert_eq!(loaded.client.user_agent, "acme/1.0");
        assert!(loaded.logging.json_output);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = AppConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, BexioError::Io(_)));
    }

    #[test]
    fn test_default_config_path() {
        let path = AppConfig::default_config_path().unwrap();
        assert!(path.ends_with("Bexio/config.toml"));
    }

    #[test]
    fn test_explicit_log_dir_wins() {
        let mut config = AppConfig::default();
        config.logging.directory = "/tmp/bexio-logs".into();
        assert_eq!(
            config.effective_log_dir().unwrap(),
            PathBuf::from("/tmp/bexio-logs")
        );
    }
}
