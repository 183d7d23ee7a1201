//! Configuration management.
//!
//! Settings are layered: `config/default.toml`, then `config/{APP_ENV}.toml`,
//! then `APP_`-prefixed environment variables using `__` as the section
//! separator. Every field has a default, so no file is required.
//!
//! ## Example Configuration
//!
//! ```toml
//! [telemetry]
//! json_logging = false
//! log_level = "debug"
//!
//! [editor]
//! debounce_ms = 500
//! run_delay_ms = 1000
//!
//! [visualizer]
//! default_speed = 50
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub visualizer: VisualizerConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Emit JSON lines instead of pretty output
    #[serde(default)]
    pub json_logging: bool,

    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

/// Code editor timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Quiet period before feedback re-runs after an edit
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Simulated execution time of "run code"
    #[serde(default = "default_run_delay_ms")]
    pub run_delay_ms: u64,

    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            run_delay_ms: default_run_delay_ms(),
            default_language: default_language(),
        }
    }
}

impl EditorConfig {
    /// Debounce window as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Run delay as a Duration
    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.run_delay_ms)
    }
}

/// Step player defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Playback speed in `1..=100`
    #[serde(default = "default_speed")]
    pub default_speed: u8,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            default_speed: default_speed(),
        }
    }
}

/// List output defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

// Default value functions
fn default_service_name() -> String {
    "codearena".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_run_delay_ms() -> u64 {
    1000
}

fn default_language() -> String {
    "javascript".to_string()
}

fn default_speed() -> u8 {
    50
}

fn default_page_size() -> u32 {
    20
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// `APP_ENV` selects the environment file (default `development`).
    /// Example override: `APP_EDITOR__DEBOUNCE_MS=250`.
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        if self.editor.debounce_ms == 0 {
            anyhow::bail!("Editor debounce must be greater than 0");
        }

        if self.editor.run_delay_ms == 0 {
            anyhow::bail!("Editor run delay must be greater than 0");
        }

        if !(1..=100).contains(&self.visualizer.default_speed) {
            anyhow::bail!(
                "Visualizer speed must be between 1 and 100, got {}",
                self.visualizer.default_speed
            );
        }

        if self.listing.default_page_size == 0 || self.listing.default_page_size > 100 {
            anyhow::bail!("Page size must be between 1 and 100");
        }

        Ok(())
    }

    /// Development defaults with verbose logging
    pub fn development() -> Self {
        Self {
            telemetry: TelemetryConfig {
                log_level: "debug".to_string(),
                ..TelemetryConfig::default()
            },
            ..Self::default()
        }
    }
}
