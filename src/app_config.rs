//! Application configuration from file and environment variables
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables (prefixed with BLACKLISTDB__, sections split by `__`)
//! 2. Config file (config.toml)
//! 3. Default values
//!
//! The legacy `API_BASE_URL` variable still fills in the reports API base URL
//! when nothing else provides one.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Reports API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsApiConfig {
    /// Base URL of the reports backend, e.g. `https://api.example.org/api`
    pub base_url: String,
    /// Collection endpoint for reports (GET list, POST multipart create)
    pub reports_path: String,
    /// Read-only endpoint for the bank reference list
    pub banks_path: String,
}

impl Default for ReportsApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            reports_path: "/scammers/".to_string(),
            banks_path: "/nigerian-banks".to_string(),
        }
    }
}

/// Content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentApiConfig {
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, without the leading `v`
    pub api_version: String,
    /// Query the CDN-backed host instead of the live API
    pub use_cdn: bool,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            project_id: "yvza11ed".to_string(),
            dataset: "production".to_string(),
            api_version: "2025-04-12".to_string(),
            use_cdn: true,
        }
    }
}

impl ContentApiConfig {
    /// Base URL for queries against this project.
    pub fn base_url(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{}.sanity.io/v{}",
            self.project_id, host, self.api_version
        )
    }

    /// Path of the query endpoint for the configured dataset.
    pub fn query_path(&self) -> String {
        format!("/data/query/{}", self.dataset)
    }
}

/// HTTP client configuration shared by both APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Request timeout in seconds. 0 keeps the transport default.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("BlacklistDB/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 0,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub reports_api: ReportsApiConfig,
    pub content_api: ContentApiConfig,
    pub http: HttpConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &str) -> Result<Self, ConfigError> {
        use config::FileFormat;

        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::new(path, FileFormat::Toml).required(false))
            // e.g. BLACKLISTDB__REPORTS_API__BASE_URL, BLACKLISTDB__HTTP__TIMEOUT_SECS
            .add_source(
                Environment::with_prefix("BLACKLISTDB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.reports_api.base_url.is_empty() {
            if let Ok(legacy) = std::env::var("API_BASE_URL") {
                log::debug!("Using legacy API_BASE_URL for the reports API");
                app_config.reports_api.base_url = legacy;
            }
        }

        log::info!(
            "Configuration loaded: content project = {}, dataset = {}",
            app_config.content_api.project_id,
            app_config.content_api.dataset
        );

        Ok(app_config)
    }
}
