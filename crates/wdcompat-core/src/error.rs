use thiserror::Error;

/// Errors raised while bootstrapping the legacy layer (config, logging).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration loading failed: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    #[error("Logging setup failed: {0}")]
    LoggingSetup(String),
}
