//! # Application State
//!
//! Shared state for the Axum application: the payment provider and the
//! server configuration. Configuration comes from environment variables,
//! optionally layered over a TOML file.

use anyhow::Context;
use intent_core::BoxedIntentProvider;
use intent_stripe::StripeIntentProvider;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "config/proxy.toml";

/// How much of an underlying error reaches the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorExposure {
    /// Provider and transport messages are returned verbatim
    #[default]
    Passthrough,
    /// Only a fixed per-category message is returned
    Sanitized,
}

impl FromStr for ErrorExposure {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" => Ok(ErrorExposure::Passthrough),
            "sanitized" => Ok(ErrorExposure::Sanitized),
            other => anyhow::bail!("unknown ERROR_EXPOSURE: {}", other),
        }
    }
}

/// Optional file layer; every field may be overridden by the environment
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub error_exposure: Option<ErrorExposure>,
    pub validate_requests: Option<bool>,
}

impl FileConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid proxy config")
    }

    /// Load `PROXY_CONFIG` if set, else `config/proxy.toml` if it exists.
    fn discover() -> anyhow::Result<Option<Self>> {
        Self::discover_from(
            std::env::var("PROXY_CONFIG").ok().as_deref(),
            Path::new(DEFAULT_CONFIG_PATH),
        )
    }

    /// An explicit path must exist; a missing fallback path is skipped.
    fn discover_from(explicit: Option<&str>, fallback: &Path) -> anyhow::Result<Option<Self>> {
        let path = match explicit {
            Some(path) => Path::new(path),
            None if fallback.exists() => fallback,
            None => return Ok(None),
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config =
            Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))?;
        tracing::info!("Loaded proxy config from {}", path.display());
        Ok(Some(config))
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Error message exposure
    pub error_exposure: ErrorExposure,
    /// Reject malformed amount/currency before calling the provider
    pub validate_requests: bool,
}

impl AppConfig {
    /// Load from the optional config file and environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let file = FileConfig::discover()?.unwrap_or_default();
        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    /// Merge a file layer with a variable lookup; the lookup wins.
    pub fn from_sources<F>(file: FileConfig, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => file.port.unwrap_or(8080),
        };

        let error_exposure = match lookup("ERROR_EXPOSURE") {
            Some(raw) => raw.parse()?,
            None => file.error_exposure.unwrap_or_default(),
        };

        let validate_requests = match lookup("VALIDATE_REQUESTS") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("VALIDATE_REQUESTS must be a boolean, got {:?}", raw))?,
            None => file.validate_requests.unwrap_or(false),
        };

        Ok(Self {
            host: lookup("HOST")
                .or(file.host)
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: lookup("ENVIRONMENT")
                .or(file.environment)
                .unwrap_or_else(|| "development".to_string()),
            error_exposure,
            validate_requests,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "development".to_string(),
            error_exposure: ErrorExposure::Passthrough,
            validate_requests: false,
        }
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("not a boolean: {}", other),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment intent provider
    pub provider: BoxedIntentProvider,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe.
    ///
    /// Fails if `STRIPE_SECRET_KEY` is missing or malformed.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let stripe = StripeIntentProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_provider(Arc::new(stripe), config))
    }

    /// Create state around an existing provider
    pub fn with_provider(provider: BoxedIntentProvider, config: AppConfig) -> Self {
        Self { provider, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_sources(FileConfig::default(), lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.error_exposure, ErrorExposure::Passthrough);
        assert!(!config.validate_requests);
        assert!(!config.is_production());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig::from_toml_str(
            r#"
            host = "127.0.0.1"
            port = 3000
            error_exposure = "sanitized"
            validate_requests = true
            "#,
        )
        .unwrap();

        let config = AppConfig::from_sources(
            file,
            lookup_from(&[("PORT", "9090"), ("ERROR_EXPOSURE", "passthrough")]),
        )
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.error_exposure, ErrorExposure::Passthrough);
        assert!(config.validate_requests);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(AppConfig::from_sources(FileConfig::default(), lookup_from(&[("PORT", "http")]))
            .is_err());
        assert!(AppConfig::from_sources(
            FileConfig::default(),
            lookup_from(&[("ERROR_EXPOSURE", "verbose")])
        )
        .is_err());
        assert!(AppConfig::from_sources(
            FileConfig::default(),
            lookup_from(&[("VALIDATE_REQUESTS", "maybe")])
        )
        .is_err());
        assert!(FileConfig::from_toml_str("port = \"eighty\"").is_err());
    }

    #[test]
    fn test_discover_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 4242\nerror_exposure = \"sanitized\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = FileConfig::discover_from(Some(&path), Path::new("does/not/exist.toml"))
            .unwrap()
            .unwrap();
        assert_eq!(config.port, Some(4242));
        assert_eq!(config.error_exposure, Some(ErrorExposure::Sanitized));
    }

    #[test]
    fn test_discover_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("proxy.toml");

        let result = FileConfig::discover_from(missing.to_str(), Path::new("unused.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("proxy.toml");

        // Missing fallback is skipped silently
        assert!(FileConfig::discover_from(None, &fallback).unwrap().is_none());

        std::fs::write(&fallback, "host = \"127.0.0.1\"\nvalidate_requests = true\n").unwrap();
        let config = FileConfig::discover_from(None, &fallback).unwrap().unwrap();
        assert_eq!(config.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.validate_requests, Some(true));
    }

    #[test]
    fn test_discover_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("proxy.toml");
        std::fs::write(&fallback, "port = \"eighty\"").unwrap();

        assert!(FileConfig::discover_from(None, &fallback).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }
}
