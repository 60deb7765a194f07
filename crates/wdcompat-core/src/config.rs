use crate::error::CoreError;
use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::{path::Path, time::Duration};

// Helper for deserializing Duration from milliseconds
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// Main configuration structure
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)] // Ensure fields default if missing in config source
pub struct Config {
    pub global: GlobalConfig,
    pub deprecation: DeprecationConfig,
    pub waits: WaitConfig,
}

// Global settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GlobalConfig {
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// How deprecation notices are surfaced besides the subscriber channel.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DeprecationConfig {
    /// Render every first-use notice through `log::warn!`.
    pub log_notices: bool,
}

impl Default for DeprecationConfig {
    fn default() -> Self {
        Self { log_notices: true }
    }
}

/// Defaults for the legacy polling waits.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WaitConfig {
    /// `waitForCondition` timeout when the caller passes none.
    #[serde(rename = "condition_timeout_ms", with = "duration_ms_serde")]
    pub condition_timeout: Duration,
    /// `waitForCondition` poll interval when the caller passes none.
    #[serde(rename = "condition_poll_interval_ms", with = "duration_ms_serde")]
    pub condition_poll_interval: Duration,
    /// Interval between size checks in `waitForVisible`.
    #[serde(rename = "visibility_poll_interval_ms", with = "duration_ms_serde")]
    pub visibility_poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            condition_timeout: Duration::from_millis(1000),
            condition_poll_interval: Duration::from_millis(100),
            visibility_poll_interval: Duration::from_millis(67),
        }
    }
}

fn base_builder() -> Result<ConfigBuilder<DefaultState>, CoreError> {
    let builder = ConfigLoader::builder()
        .set_default("global.log_level", "info")?
        .set_default("deprecation.log_notices", true)?
        .set_default("waits.condition_timeout_ms", 1000u64)?
        .set_default("waits.condition_poll_interval_ms", 100u64)?
        .set_default("waits.visibility_poll_interval_ms", 67u64)?;
    Ok(builder)
}

fn env_source() -> Environment {
    Environment::with_prefix("WDCOMPAT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Loads configuration from default locations and environment variables.
///
/// Looks for `wdcompat.toml` (or `.json`, `.yaml`, etc.) in the current directory.
/// Overrides with environment variables prefixed with `WDCOMPAT_`
/// (e.g., `WDCOMPAT_WAITS__CONDITION_TIMEOUT_MS=5000`).
/// Note the double underscore `__` for nested fields.
pub fn load_config() -> Result<Config, CoreError> {
    let builder = base_builder()?
        .add_source(File::with_name("wdcompat").required(false))
        .add_source(env_source())
        .build()?;

    let cfg: Config = builder.try_deserialize()?;
    log::debug!("Loaded configuration: {:?}", cfg);
    Ok(cfg)
}

/// Loads configuration from an explicit file, still honouring environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config, CoreError> {
    if !path.exists() {
        log::warn!("Specified configuration file not found: {:?}", path);
        return Err(CoreError::ConfigNotFound(path.display().to_string()));
    }

    log::debug!("Loading configuration from: {:?}", path);
    let builder = base_builder()?
        .add_source(File::from(path).required(true))
        .add_source(env_source())
        .build()?;

    builder.try_deserialize().map_err(CoreError::ConfigLoad)
}
