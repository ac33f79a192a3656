//! Configuration for the console CLI
//!
//! Values are layered, later sources winning:
//! - Defaults
//! - Configuration file (`iam-console.toml`, or the path in `IAM_CONSOLE_CONFIG_FILE`)
//! - Environment variables with the `IAM_CONSOLE` prefix, e.g. `IAM_CONSOLE__SERVER__URL`

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File};
use iam_console_core::ConsoleSettings;
use iam_identity_oauth2::StateCodec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_CONFIG_FILE: &str = "iam-console.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Where the backend and the console live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Backend base URL (default: http://localhost:8000)
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Console origin that provider callbacks return to (default: http://localhost:7001)
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Base URL of the provider logo images
    #[serde(default = "default_static_base_url")]
    pub static_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Key for signing the OAuth `state` parameter. Unsigned when absent.
    #[serde(default)]
    pub state_secret: Option<String>,

    /// Backend request timeout in seconds (default: 30)
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_origin() -> String {
    "http://localhost:7001".to_string()
}

fn default_static_base_url() -> String {
    "/static".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            origin: default_origin(),
            static_base_url: default_static_base_url(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            state_secret: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn parse_http_url(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).with_context(|| format!("Invalid {} '{}'", name, value))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{} must be an http or https URL, got '{}'", name, value);
    }
    Ok(url)
}

impl Config {
    /// Loads configuration from `path`, or from the default file location
    /// when `path` is `None`, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => std::env::var("IAM_CONSOLE_CONFIG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        let mut builder = ConfigBuilder::builder();

        if config_path.exists() {
            info!("Loading configuration from {}", config_path.display());
            builder = builder.add_source(File::from(config_path.as_path()));
        } else if path.is_some() {
            anyhow::bail!("Configuration file {} not found", config_path.display());
        } else {
            debug!("No config file found at {}, using defaults", config_path.display());
        }

        builder = builder.add_source(
            Environment::with_prefix("IAM_CONSOLE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let mut settings: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if let Ok(log_level) = std::env::var("RUST_LOG") {
            debug!("Using RUST_LOG environment variable");
            settings.logging.level = log_level;
        }

        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        parse_http_url("server.url", &self.server.url)?;
        parse_http_url("server.origin", &self.server.origin)?;

        if self.auth.http_timeout_seconds == 0 {
            anyhow::bail!("HTTP timeout must be greater than 0");
        }

        if self.auth.state_secret.as_deref().is_some_and(str::is_empty) {
            anyhow::bail!("State secret cannot be empty; remove it to disable state signing");
        }

        if self.is_filter_directive() {
            if let Err(e) = EnvFilter::try_new(&self.logging.level) {
                anyhow::bail!(
                    "Invalid log filter '{}': {}. Use one of {:?} or a filter directive",
                    self.logging.level,
                    e,
                    LOG_LEVELS
                );
            }
        }

        let valid_formats = ["pretty", "json", "compact"];
        let format_lower = self.logging.format.to_lowercase();
        if !valid_formats.contains(&format_lower.as_str()) {
            anyhow::bail!(
                "Invalid log format '{}'. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            );
        }

        Ok(())
    }

    /// Anything but a plain level is handed to the subscriber as written,
    /// including a bare target such as `iam_console`.
    fn is_filter_directive(&self) -> bool {
        !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str())
    }

    /// Filter string for the tracing subscriber.
    pub fn log_filter(&self) -> String {
        if self.is_filter_directive() {
            self.logging.level.clone()
        } else {
            format!(
                "iam_console={level},iam_identity_oauth2={level},iam_backend_client={level},{level}",
                level = self.logging.level
            )
        }
    }

    pub fn to_settings(&self) -> Result<ConsoleSettings> {
        let server_url = parse_http_url("server.url", &self.server.url)?;
        let origin = parse_http_url("server.origin", &self.server.origin)?;
        Ok(ConsoleSettings::new(server_url, origin)
            .with_static_base_url(self.server.static_base_url.clone()))
    }

    pub fn state_codec(&self) -> StateCodec {
        match &self.auth.state_secret {
            Some(secret) => StateCodec::with_signing_key(secret.as_bytes().to_vec()),
            None => StateCodec::new(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.auth.http_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.state_codec().is_signed());
        assert_eq!(config.http_timeout(), Duration::from_secs(30));

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.callback_url(), "http://localhost:7001/callback");
        assert_eq!(settings.static_base_url, "/static");
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[server]
url = "https://iam.example.com"
origin = "https://console.example.com"

[auth]
state_secret = "s3cret"
http_timeout_seconds = 5

[logging]
format = "json"
"#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.url, "https://iam.example.com");
        assert_eq!(config.server.static_base_url, "/static");
        assert_eq!(config.auth.http_timeout_seconds, 5);
        assert!(config.state_codec().is_signed());
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = Config::default();
        config.server.url = "ftp://iam.example.com".to_string();
        assert!(config.validate().is_err());

        config.server.url = default_server_url();
        config.auth.http_timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.auth.http_timeout_seconds = 30;
        config.auth.state_secret = Some(String::new());
        assert!(config.validate().is_err());

        config.auth.state_secret = None;
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        config.logging.format = "pretty".to_string();
        config.logging.level = "iam_console=loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_filter() {
        let mut config = Config::default();
        config.logging.level = "debug".to_string();
        assert_eq!(
            config.log_filter(),
            "iam_console=debug,iam_identity_oauth2=debug,iam_backend_client=debug,debug"
        );

        config.logging.level = "info,iam_backend_client=trace".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter(), "info,iam_backend_client=trace");

        config.logging.level = "WARN".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.log_filter(),
            "iam_console=WARN,iam_identity_oauth2=WARN,iam_backend_client=WARN,WARN"
        );
    }

    #[test]
    fn test_bare_target_filter() {
        let mut config = Config::default();
        config.logging.level = "iam_console".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter(), "iam_console");

        config.logging.level = "iam_backend_client::auth".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter(), "iam_backend_client::auth");
    }
}
