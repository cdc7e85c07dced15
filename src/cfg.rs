use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const CONFIG_PATH_VAR: &str = "EMBERBOT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "emberbot.toml";
pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for `{0}`: {1}")]
    InvalidValue(&'static str, String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfiguration {
    pub bot_name: String,
    pub command_prefix: String,
    pub default_server: String,
    pub default_port: u16,
    pub presence_label: String,
    pub presence_interval_secs: u64,
    pub presence_retries: u32,
    pub presence_retry_delay_secs: u64,
    pub log_level: String,
    pub ping: PingSettings,
}

impl Default for BotConfiguration {
    fn default() -> Self {
        BotConfiguration {
            bot_name: "Ember".to_string(),
            command_prefix: "!".to_string(),
            default_server: "play.voidtales.win".to_string(),
            default_port: 25565,
            presence_label: "Void Tales".to_string(),
            presence_interval_secs: 30,
            presence_retries: 3,
            presence_retry_delay_secs: 2,
            log_level: "info".to_string(),
            ping: PingSettings::default(),
        }
    }
}

/// The `[ping]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingSettings {
    /// Protocol version sent in the handshake. 766 is 1.20.5.
    pub protocol_version: u32,
    pub timeout_secs: u64,
}

impl Default for PingSettings {
    fn default() -> Self {
        PingSettings {
            protocol_version: 766,
            timeout_secs: 5,
        }
    }
}

impl BotConfiguration {
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let mut file = File::open(path).await?;
        let mut buf = String::new();
        file.read_to_string(&mut buf).await?;

        Self::parse(&buf)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let cfg: BotConfiguration = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub async fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        let mut file = File::create(path).await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_prefix.is_empty() {
            return Err(ConfigError::InvalidValue(
                "command_prefix",
                "must not be empty".into(),
            ));
        }
        if self.presence_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "presence_interval_secs",
                "must be at least 1".into(),
            ));
        }
        if self.ping.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "ping.timeout_secs",
                "must be at least 1".into(),
            ));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidValue("log_level", self.log_level.clone()))
    }

    pub fn presence_interval(&self) -> Duration {
        Duration::from_secs(self.presence_interval_secs)
    }

    pub fn presence_retry_delay(&self) -> Duration {
        Duration::from_secs(self.presence_retry_delay_secs)
    }
}

/// What the ping client needs at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingConfiguration {
    pub protocol_version: u32,
    pub timeout: Duration,
}

impl PingConfiguration {
    pub fn from_cfg(cfg: &PingSettings) -> Self {
        PingConfiguration {
            protocol_version: cfg.protocol_version,
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

impl Default for PingConfiguration {
    fn default() -> Self {
        Self::from_cfg(&PingSettings::default())
    }
}

#[derive(Clone)]
pub struct Secrets {
    pub discord_token: String,
}

impl Secrets {
    /// Reads secrets from the environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let discord_token = std::env::var(TOKEN_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(TOKEN_VAR.to_string()))?;

        Ok(Secrets { discord_token })
    }
}
