//! Client-side polling of remote scripts.

use log::trace;
use serde_json::Value;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use wdcompat_interfaces::{ApiError, CommandEngine, ElementHandle};

/// Truthy when the element's rendered box has a non-zero width and height.
pub const VISIBILITY_SCRIPT: &str =
    "return arguments[0].offsetWidth && arguments[0].offsetHeight ? true : null;";

/// Evaluates `arguments[0]` in the page; truthy results end the poll.
pub const CONDITION_SCRIPT: &str = "return eval(arguments[0]) ? true : null;";

/// Executes `script` with `args` until it returns something other than `null` or
/// `false`, or until `timeout` has elapsed.
///
/// # Returns
/// - `Ok(value)` with the first non-null, non-false result.
/// - `Ok(Value::Null)` when the deadline passes first.
/// - `Err(ApiError)` when an execution fails; polling stops there.
pub async fn poll_until(
    engine: &dyn CommandEngine,
    script: &str,
    args: Vec<Value>,
    timeout: Duration,
    interval: Duration,
) -> Result<Value, ApiError> {
    let deadline = Instant::now() + timeout;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let result = engine.execute(script, args.clone()).await?;
        if !matches!(result, Value::Null | Value::Bool(false)) {
            trace!("poll_until satisfied after {} attempts", attempts);
            return Ok(result);
        }

        let now = Instant::now();
        if now >= deadline {
            trace!("poll_until gave up after {} attempts", attempts);
            return Ok(Value::Null);
        }
        sleep(interval.min(deadline - now)).await;
    }
}

/// Polls an element until it has a rendered size.
#[derive(Debug, Clone)]
pub struct VisibilityPoller {
    interval: Duration,
}

impl VisibilityPoller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// `Ok(false)` means the deadline passed without the element becoming visible.
    pub async fn wait_until_visible(
        &self,
        engine: &dyn CommandEngine,
        element: &ElementHandle,
        timeout: Duration,
    ) -> Result<bool, ApiError> {
        let outcome = poll_until(
            engine,
            VISIBILITY_SCRIPT,
            vec![element.to_json()],
            timeout,
            self.interval,
        )
        .await?;
        Ok(!outcome.is_null())
    }
}
