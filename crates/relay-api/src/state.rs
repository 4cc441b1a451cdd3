//! # Application State
//!
//! Configuration and shared state for the Axum application.
//!
//! Configuration is resolved once at startup, lowest precedence first:
//! built-in defaults, an optional `relay.toml`, a `.env` file, then the
//! process environment. Secrets are only read from the environment.

use anyhow::Context;
use relay_core::{CheckoutLinks, SharedPaymentIntentGateway, CHECKOUT_URL_VAR};
use relay_stripe::{StripeConfig, StripePaymentIntents, DEFAULT_API_BASE_URL, SECRET_KEY_VAR};
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "RELAY_CONFIG";

const CONFIG_PATHS: [&str; 3] = [
    "config/relay.toml",
    "../config/relay.toml",
    "../../config/relay.toml",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Unknown log format: {} (expected pretty or json)", other),
        }
    }
}

// =============================================================================
// Config file
// =============================================================================

/// Contents of `relay.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub checkout: CheckoutSection,
    pub stripe: StripeSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub log_format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckoutSection {
    pub base_url: Option<String>,
}

/// No `secret_key` here: a secret in the file is rejected as an unknown field
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripeSection {
    pub api_base_url: Option<String>,
    pub api_version: Option<String>,
}

impl FileConfig {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Locate and read the config file, if there is one
fn load_config_file(explicit: Option<String>) -> anyhow::Result<(FileConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let path = PathBuf::from(path);
        return Ok((FileConfig::read(&path)?, Some(path)));
    }

    for path in CONFIG_PATHS {
        let path = Path::new(path);
        if path.is_file() {
            return Ok((FileConfig::read(path)?, Some(path.to_path_buf())));
        }
    }

    Ok((FileConfig::default(), None))
}

// =============================================================================
// AppConfig
// =============================================================================

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    pub log_format: LogFormat,
    /// Hosted checkout base URL; checkout requests fail without it
    pub checkout_base_url: Option<String>,
    /// Stripe secret; payment intent requests fail without it
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base_url: String,
    pub stripe_api_version: Option<String>,
    /// Config file that was read, if any
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Load from `.env`, the config file and the process environment
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        let (file, source) = load_config_file(env(CONFIG_PATH_VAR))?;

        let mut config = Self::from_sources(file, env)?;
        config.source = source;
        Ok(config)
    }

    /// Merge a parsed config file with an environment lookup.
    ///
    /// Empty environment values are treated as unset.
    pub fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let env = |key: &str| env(key).filter(|v| !v.is_empty());
        let FileConfig {
            server,
            checkout,
            stripe,
        } = file;

        let port = match env("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {}", port))?,
            None => server.port.unwrap_or(8080),
        };

        let log_format = match env("LOG_FORMAT").or(server.log_format) {
            Some(format) => format.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        let config = Self {
            host: env("HOST")
                .or(server.host)
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment: env("ENVIRONMENT")
                .or(server.environment)
                .unwrap_or_else(|| "development".to_string()),
            log_format,
            checkout_base_url: env(CHECKOUT_URL_VAR).or(checkout.base_url),
            stripe_secret_key: env(SECRET_KEY_VAR),
            stripe_api_base_url: env("STRIPE_API_BASE_URL")
                .or(stripe.api_base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            stripe_api_version: env("STRIPE_API_VERSION").or(stripe.api_version),
            source: None,
        };

        config.socket_addr()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Stripe configuration, when a secret key is present
    pub fn stripe_config(&self) -> Option<StripeConfig> {
        self.stripe_secret_key.as_deref().map(|key| {
            StripeConfig::new(key)
                .with_api_base_url(&self.stripe_api_base_url)
                .with_api_version(self.stripe_api_version.clone())
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("log_format", &self.log_format)
            .field("checkout_base_url", &self.checkout_base_url)
            .field(
                "stripe_secret_key",
                &self.stripe_secret_key.as_ref().map(|_| "[redacted]"),
            )
            .field("stripe_api_base_url", &self.stripe_api_base_url)
            .field("stripe_api_version", &self.stripe_api_version)
            .field("source", &self.source)
            .finish()
    }
}

// =============================================================================
// AppState
// =============================================================================

/// Shared application state.
///
/// Immutable after startup; cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Checkout link builder
    pub checkout: CheckoutLinks,
    /// Payment intent provider; `None` when no secret key is configured
    pub payment_intents: Option<SharedPaymentIntentGateway>,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state from configuration, wiring Stripe when a key is present
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let checkout = CheckoutLinks::new(config.checkout_base_url.clone());

        let payment_intents = match config.stripe_config() {
            Some(stripe) => {
                let client = reqwest::Client::builder()
                    .build()
                    .context("Failed to create HTTP client")?;
                Some(Arc::new(StripePaymentIntents::new(stripe, client)) as SharedPaymentIntentGateway)
            }
            None => None,
        };

        Ok(Self {
            checkout,
            payment_intents,
            config: Arc::new(config),
        })
    }

    /// Provider name for startup logging
    pub fn payment_provider(&self) -> Option<&'static str> {
        self.payment_intents.as_ref().map(|g| g.provider_name())
    }
}
