//! # wdcompat Core
//!
//! Ambient pieces shared by the legacy layer: configuration loading,
//! logging setup and bootstrap errors.

pub mod config;
pub mod error;
pub mod logging;

pub use self::config::{Config, DeprecationConfig, GlobalConfig, WaitConfig, load_config, load_config_from};
pub use error::CoreError;
