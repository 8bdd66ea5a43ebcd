//! # Client Configuration
//!
//! Configuration management for the dashboard client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKWISE_API_URL=http://10.0.0.5:5000/api                         │
//! │     STOCKWISE_TREND_SKU=54a1c574-...                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/dashboard/client.toml (Linux)                            │
//! │     ~/Library/Application Support/com.stockwise.dashboard/ (macOS)     │
//! │     or --config <path>                                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://127.0.0.1:5000/api, export to ".", Dashboard view           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "http://127.0.0.1:5000/api"
//! connect_timeout_secs = 10
//! # request_timeout_secs = 30
//! user_agent = "stockwise-dashboard/0.1"
//!
//! [export]
//! directory = "."
//!
//! [dashboard]
//! # trend_sku = "54a1c574-4605-4b20-b2ae-65746d4517ff"
//! initial_view = "dashboard"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// How to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// TCP connect timeout.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout. Unset means requests wait for the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("stockwise-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiSettings {
    /// Connect timeout as a Duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a Duration, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Parses and checks the base URL.
    pub fn parsed_base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "API URL must use http or https, got: {}",
                other
            ))),
        }
    }
}

// =============================================================================
// Export Settings
// =============================================================================

/// Where report downloads land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

// =============================================================================
// Dashboard Settings
// =============================================================================

/// Presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// SKU whose weekly trend the dashboard shows on start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_sku: Option<String>,

    /// View shown on start (dashboard, catalog, advisor, reports, settings).
    #[serde(default = "default_initial_view")]
    pub initial_view: String,
}

fn default_initial_view() -> String {
    "dashboard".to_string()
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            trend_sku: None,
            initial_view: default_initial_view(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.api.parsed_base_url()?;

        if self.api.connect_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.api.request_timeout_secs == Some(0) {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STOCKWISE_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("STOCKWISE_CONNECT_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.connect_timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring invalid STOCKWISE_CONNECT_TIMEOUT_SECS"),
            }
        }

        if let Some(secs) = lookup("STOCKWISE_REQUEST_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.request_timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring invalid STOCKWISE_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(dir) = lookup("STOCKWISE_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.directory = PathBuf::from(dir);
        }

        if let Some(sku) = lookup("STOCKWISE_TREND_SKU") {
            self.dashboard.trend_sku = Some(sku).filter(|s| !s.trim().is_empty());
        }

        if let Some(view) = lookup("STOCKWISE_INITIAL_VIEW") {
            self.dashboard.initial_view = view;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockwise", "dashboard")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }
}
