//! Configuration management for the Eobot client
//!
//! Settings are layered: built-in defaults, then an optional YAML/JSON/TOML file,
//! then `EOBOT_*` environment variables (`__` separates nested keys, e.g.
//! `EOBOT_HTTP__TIMEOUT=10s`). Durations use humantime notation.

use crate::types::UserId;
use crate::{Error, Result};
use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Public endpoint of the Eobot API
pub const DEFAULT_BASE_URL: &str = "https://www.eobot.com/api.aspx";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "EOBOT";

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint all requests are sent to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account the client acts for, unless an operation names another one
    #[serde(default)]
    pub user_id: Option<String>,

    /// Verify the server certificate
    #[serde(default = "default_true")]
    pub validate_ssl: bool,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total time allowed for one request
    #[serde(default = "default_timeout", with = "humantime_duration")]
    pub timeout: Duration,

    /// Time allowed to establish the connection
    #[serde(default = "default_connect_timeout", with = "humantime_duration")]
    pub connect_timeout: Duration,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level or filter directives, e.g. `info` or `eobot_client=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::APP_VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: None,
            validate_ssl: true,
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration acting for the given account, everything else default
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Load defaults, an optional file, then `EOBOT_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration text, choosing the format from the name's extension
    ///
    /// Names without a known extension are read as JSON when the text starts
    /// with `{` and as YAML otherwise.
    pub fn from_contents(contents: &str, name: &str) -> Result<Self> {
        let format = Self::detect_format(contents, name);

        let config: Self = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(File::from_str(contents, format))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn detect_format(contents: &str, name: &str) -> FileFormat {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => FileFormat::Json,
            Some("toml") => FileFormat::Toml,
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ if contents.trim_start().starts_with('{') => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Base URL must use http or https: {}",
                self.base_url
            )));
        }

        if let Some(user_id) = &self.user_id {
            user_id.parse::<UserId>().map_err(|_| {
                Error::config(format!("User ID '{}' must be numeric", user_id))
            })?;
        }

        if self.http.timeout.is_zero() {
            return Err(Error::config("HTTP timeout must be greater than 0"));
        }
        if self.http.connect_timeout.is_zero() {
            return Err(Error::config("HTTP connect timeout must be greater than 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(Error::config("User agent must not be empty"));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", self.logging.level, e))
        })?;

        Ok(())
    }

    /// Parsed API endpoint
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::config(format!("Failed to serialize configuration: {}", e)))
    }

    /// Effective configuration as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize configuration: {}", e)))
    }
}

/// Serde adapter writing durations as humantime strings
mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&humantime::format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}
