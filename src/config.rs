use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::session::{SessionOptions, DEFAULT_VOLUME};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Discord
    pub discord_token: String,
    pub command_prefix: String,

    // Audio
    pub default_volume: u8,
    pub max_queue_size: usize,
}

impl Config {
    /// Carga la configuración del entorno (y de `.env`, si existe)
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            discord_token: std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?,
            command_prefix: std::env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string()),

            default_volume: std::env::var("DEFAULT_VOLUME")
                .unwrap_or_else(|_| DEFAULT_VOLUME.to_string())
                .parse()
                .context("DEFAULT_VOLUME must be a number between 0 and 100")?,
            max_queue_size: std::env::var("MAX_QUEUE_SIZE")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("MAX_QUEUE_SIZE must be a positive number")?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validates configuration values for correctness.
    ///
    /// # Validation Rules
    ///
    /// - Default volume must be between 0 and 100
    /// - The command prefix must not be blank
    /// - The queue must hold at least one track
    pub fn validate(&self) -> Result<()> {
        if self.default_volume > 100 {
            anyhow::bail!(
                "Default volume must be between 0 and 100, got: {}",
                self.default_volume
            );
        }

        if self.command_prefix.trim().is_empty() {
            anyhow::bail!("Command prefix must not be empty");
        }

        if self.max_queue_size == 0 {
            anyhow::bail!("Max queue size must be greater than 0");
        }

        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            default_volume: self.default_volume,
            max_queue_size: self.max_queue_size,
        }
    }

    /// Returns a summary of the current configuration for logging.
    ///
    /// The Discord token is left out.
    pub fn summary(&self) -> String {
        format!(
            "Config Summary:\n  \
            Commands: prefix '{}'\n  \
            Audio: {}% default volume, {} max queued tracks",
            self.command_prefix, self.default_volume, self.max_queue_size
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Discord (sin token por defecto, es obligatorio)
            discord_token: String::new(),
            command_prefix: "!".to_string(),

            default_volume: DEFAULT_VOLUME,
            max_queue_size: 1000,
        }
    }
}
