//! Process configuration.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Built-in defaults
//! 2. TOML file (`./linkdrop.toml`, or the path given with `--config`)
//! 3. Environment variables (`BOT_TOKEN`, `ADMIN_ID`, `ENVIRONMENT`,
//!    `WEBHOOK_URL`, `PORT`, `DATABASE_URL`, `BOT_USERNAME`, `POLL_TIMEOUT`)

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use derive_getters::Getters;
use linkdrop_core::MediaKind;
use linkdrop_error::{ConfigError, LinkdropError, LinkdropResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Privileged identity used when none is configured.
pub const DEFAULT_ADMIN_ID: i64 = 6319246165;

/// HTTP port used when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// `getUpdates` long-poll timeout in seconds.
pub const DEFAULT_POLL_TIMEOUT: u64 = 30;

/// How updates reach the bot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    /// The bot pulls updates with `getUpdates`
    #[default]
    #[display("polling")]
    Polling,
    /// Telegram pushes updates to the HTTP server
    #[display("webhook")]
    Webhook,
}

/// A descriptor registered at startup if its slug is still free.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedEntry {
    /// Slug to register
    pub slug: String,
    /// Telegram file ID
    pub media_handle: String,
    /// Delivery kind
    pub media_kind: MediaKind,
    /// Optional caption
    #[serde(default)]
    pub caption: Option<String>,
}

/// Complete linkdrop configuration.
///
/// # Example
///
/// ```
/// use linkdrop::{LinkdropConfig, OperatingMode};
/// use std::collections::HashMap;
///
/// let env = HashMap::from([("BOT_TOKEN".to_string(), "123:abc".to_string())]);
/// let config = LinkdropConfig::from_sources("", env).unwrap();
///
/// assert_eq!(*config.environment(), OperatingMode::Polling);
/// assert_eq!(*config.port(), 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct LinkdropConfig {
    /// Bot API credential
    #[serde(default)]
    bot_token: String,
    /// The one identity allowed to register slugs and read status
    #[serde(default = "default_admin_id")]
    admin_id: i64,
    /// Operating mode
    #[serde(default)]
    environment: OperatingMode,
    /// Public base URL the webhook is registered under
    #[serde(default)]
    webhook_url: Option<String>,
    /// HTTP listen port
    #[serde(default = "default_port")]
    port: u16,
    /// PostgreSQL connection string
    #[serde(default)]
    database_url: Option<String>,
    /// Bot username for deep links; asked from Telegram when absent
    #[serde(default)]
    bot_username: Option<String>,
    /// Long-poll timeout in seconds
    #[serde(default = "default_poll_timeout")]
    poll_timeout: u64,
    /// Descriptors registered at startup
    #[serde(default)]
    seed: Vec<SeedEntry>,
}

fn default_admin_id() -> i64 {
    DEFAULT_ADMIN_ID
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_poll_timeout() -> u64 {
    DEFAULT_POLL_TIMEOUT
}

impl LinkdropConfig {
    /// Load from the config file and the process environment.
    ///
    /// Without `path`, `./linkdrop.toml` is read if it exists.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source cannot be parsed or the
    /// result fails validation.
    #[instrument]
    pub fn load(path: Option<&Path>) -> LinkdropResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("linkdrop").required(false),
        };

        Self::build(
            Config::builder()
                .add_source(file)
                .add_source(Environment::default().try_parsing(true)),
        )
    }

    /// Load from TOML text and an explicit environment map.
    pub fn from_sources(toml: &str, env: HashMap<String, String>) -> LinkdropResult<Self> {
        Self::build(
            Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .add_source(
                    Environment::default()
                        .source(Some(env.into_iter().collect()))
                        .try_parsing(true),
                ),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> LinkdropResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                LinkdropError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LinkdropError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        debug!(
            mode = %config.environment,
            port = config.port,
            seeds = config.seed.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check cross-field requirements.
    pub fn validate(&self) -> LinkdropResult<()> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::new("BOT_TOKEN is required").into());
        }

        if self.environment == OperatingMode::Webhook
            && self.webhook_url.as_deref().is_none_or(|url| url.trim().is_empty())
        {
            return Err(ConfigError::new("WEBHOOK_URL is required in webhook mode").into());
        }

        Ok(())
    }

    /// Full URL Telegram should post updates to.
    ///
    /// Returns `None` when no webhook base URL is configured.
    pub fn webhook_endpoint(&self) -> Option<String> {
        self.webhook_url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), self.bot_token))
    }
}
