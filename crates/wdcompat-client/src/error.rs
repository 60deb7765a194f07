//! Errors specific to building and installing the legacy layer.

use thiserror::Error;
use wdcompat_core::CoreError;
use wdcompat_interfaces::ApiError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration loading failed: {0}")]
    ConfigError(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ConfigError(e) => ApiError::InternalError(format!("Config error: {}", e)),
            ClientError::Api(api_err) => api_err,
        }
    }
}
