//! Temporary overrides of engine settings with guaranteed restoration.

use async_trait::async_trait;
use log::{debug, error};
use std::fmt::Debug;
use std::future::Future;
use wdcompat_interfaces::{ApiError, CommandEngine};

/// A setting that can be read and written asynchronously.
#[async_trait]
pub trait ScopedSetting: Send + Sync {
    type Value: Clone + Debug + Send + Sync;

    /// Name used in logs and in `ApiError::SettingRestore`.
    fn name(&self) -> &'static str;

    async fn get(&self) -> Result<Self::Value, ApiError>;

    async fn set(&self, value: Self::Value) -> Result<(), ApiError>;
}

/// The engine's implicit wait for element lookups, in milliseconds.
pub struct FindTimeout<'a> {
    engine: &'a dyn CommandEngine,
}

impl<'a> FindTimeout<'a> {
    pub fn new(engine: &'a dyn CommandEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ScopedSetting for FindTimeout<'_> {
    type Value = u64;

    fn name(&self) -> &'static str {
        "find timeout"
    }

    async fn get(&self) -> Result<u64, ApiError> {
        self.engine.get_find_timeout().await
    }

    async fn set(&self, value: u64) -> Result<(), ApiError> {
        self.engine.set_find_timeout(value).await
    }
}

/// Runs `operation` with `setting` temporarily set to `temporary`.
///
/// The original value is read first and written back exactly once after the
/// operation settles, whatever its outcome, and before that outcome is returned.
/// A failed restore never hides an operation failure; it is only reported when
/// the operation itself succeeded.
pub async fn with_temporary_setting<S, F, T>(
    setting: &S,
    temporary: S::Value,
    operation: F,
) -> Result<T, ApiError>
where
    S: ScopedSetting + ?Sized,
    F: Future<Output = Result<T, ApiError>>,
{
    let original = setting.get().await?;
    debug!(
        "Overriding {} {:?} -> {:?}",
        setting.name(),
        original,
        temporary
    );

    let outcome = match setting.set(temporary).await {
        Ok(()) => operation.await,
        Err(err) => Err(err),
    };

    let restored = setting.set(original.clone()).await;
    debug!("Restored {} to {:?}", setting.name(), original);

    match (outcome, restored) {
        (outcome, Ok(())) => outcome,
        (Err(err), Err(restore_err)) => {
            error!(
                "Failed to restore {} after a failed operation: {}",
                setting.name(),
                restore_err
            );
            Err(err)
        }
        (Ok(_), Err(restore_err)) => Err(ApiError::SettingRestore {
            setting: setting.name().to_string(),
            reason: restore_err.to_string(),
        }),
    }
}
