use crate::error::{NotifierError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix for overrides, e.g. `NOTIFIER_SCHEDULER__POLL_INTERVAL_SECS`
pub const ENV_PREFIX: &str = "NOTIFIER";

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "notifier.toml";

const PLACEHOLDER_WEBHOOK: &str = "https://discord.com/api/webhooks/your_webhook_url_here";

/// Configuration for the tournament notifier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Upstream content API
    pub api: ApiConfig,

    /// Webhook target and mention
    pub webhook: WebhookConfig,

    /// Snapshot file location
    pub storage: StorageConfig,

    /// Polling and pacing intervals
    pub scheduler: SchedulerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Tournament information endpoint
    pub url: String,

    /// Per-request timeout in seconds, shared by fetch and webhook calls
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    User,
    Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Webhook URL notifications are posted to
    pub url: String,

    /// Whether the mention pings a user or a role
    pub mention_kind: MentionKind,

    /// Snowflake id of the mentioned user or role
    pub mention_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Snapshot of the last seen tournaments
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Sleep between cycles in seconds
    pub poll_interval_secs: u64,

    /// Pause after each webhook send in milliseconds
    pub send_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://fortnitecontent-website-prod07.ol.epicgames.com/content/api/pages/fortnite-game/tournamentinformation".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: PLACEHOLDER_WEBHOOK.to_string(),
            mention_kind: MentionKind::User,
            mention_id: "123456789012345678".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { state_file: PathBuf::from("old_tournaments.json") }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { poll_interval_secs: 60, send_delay_ms: 2_000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl NotifierConfig {
    /// Load configuration: defaults, then the TOML file, then `NOTIFIER_*` variables.
    ///
    /// An explicit `path` must exist; without one, `notifier.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: NotifierConfig = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.api.url)
            .map_err(|e| NotifierError::config(format!("Invalid api.url {:?}: {}", self.api.url, e)))?;

        reqwest::Url::parse(&self.webhook.url).map_err(|e| {
            NotifierError::config(format!("Invalid webhook.url {:?}: {}", self.webhook.url, e))
        })?;

        if self.webhook.mention_id.is_empty()
            || !self.webhook.mention_id.chars().all(|c| c.is_ascii_digit())
        {
            return Err(NotifierError::config(format!(
                "Invalid webhook.mention_id {:?}: expected a numeric id",
                self.webhook.mention_id
            )));
        }

        if self.storage.state_file.as_os_str().is_empty() {
            return Err(NotifierError::config("storage.state_file must not be empty"));
        }

        if self.scheduler.poll_interval_secs == 0 {
            return Err(NotifierError::config("scheduler.poll_interval_secs must be positive"));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(NotifierError::config("api.request_timeout_secs must be positive"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(NotifierError::config(format!("Invalid log level: {}", other))),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            other => return Err(NotifierError::config(format!("Invalid log format: {}", other))),
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.poll_interval_secs)
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.scheduler.send_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }
}

impl WebhookConfig {
    /// Mention string placed in the message content
    pub fn mention(&self) -> String {
        match self.mention_kind {
            MentionKind::User => format!("<@{}>", self.mention_id),
            MentionKind::Role => format!("<@&{}>", self.mention_id),
        }
    }

    /// True while the webhook still points at the shipped placeholder
    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_WEBHOOK
    }
}
