//! Optional helper for setting up logging using `env_logger`.
//!
//! Deprecation notices are logged under their own target, [`NOTICE_TARGET`], so
//! they can be silenced or kept independently of the general level.

use crate::config::Config;
use crate::error::CoreError;
use log::LevelFilter;
use std::str::FromStr;

/// Log target used for rendered deprecation notices.
pub const NOTICE_TARGET: &str = "wdcompat::deprecation";

/// Level for everything except deprecation notices. Unparsable values fall back to `Info`.
pub fn base_level(config: &Config) -> LevelFilter {
    LevelFilter::from_str(&config.global.log_level).unwrap_or(LevelFilter::Info)
}

/// Level for [`NOTICE_TARGET`]: at least `Warn` while notices are logged, `Off` otherwise.
pub fn notice_level(config: &Config) -> LevelFilter {
    if config.deprecation.log_notices {
        base_level(config).max(LevelFilter::Warn)
    } else {
        LevelFilter::Off
    }
}

#[cfg(feature = "env_logger")]
pub fn setup_logging(config: &Config) -> Result<(), CoreError> {
    use env_logger::{Builder, Env};

    let level = base_level(config);
    Builder::from_env(Env::default().default_filter_or(level.to_string()))
        .filter_module(NOTICE_TARGET, notice_level(config))
        .try_init()
        .map_err(|e| CoreError::LoggingSetup(e.to_string()))
}

#[cfg(not(feature = "env_logger"))]
pub fn setup_logging(_config: &Config) -> Result<(), CoreError> {
    log::debug!("env_logger feature not enabled, logging setup left to the host");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str, log_notices: bool) -> Config {
        let mut config = Config::default();
        config.global.log_level = level.to_string();
        config.deprecation.log_notices = log_notices;
        config
    }

    #[test]
    fn unknown_levels_fall_back_to_info() {
        assert_eq!(base_level(&config("chatty", true)), LevelFilter::Info);
        assert_eq!(base_level(&config("debug", true)), LevelFilter::Debug);
    }

    #[test]
    fn notices_stay_visible_under_a_quiet_base_level() {
        assert_eq!(notice_level(&config("error", true)), LevelFilter::Warn);
        assert_eq!(notice_level(&config("trace", true)), LevelFilter::Trace);
    }

    #[test]
    fn notices_are_off_when_not_logged() {
        assert_eq!(notice_level(&config("trace", false)), LevelFilter::Off);
    }
}
