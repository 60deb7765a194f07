use crate::common::*;
use crate::error::ApiError;
use crate::method::Method;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// The modern command API the legacy layer translates into.
///
/// Implementors provide `invoke` plus the context/session accessors; the typed
/// helpers are built on `invoke` and only decode its replies.
#[async_trait]
pub trait CommandEngine: Send + Sync + Debug {
    /// Runs `method` against `target` with positional `args`.
    ///
    /// # Returns
    /// - `Ok(Reply)` with the command's result.
    /// - `Err(ApiError)` exactly as the remote end reported it.
    async fn invoke(&self, method: Method, target: Target, args: Vec<Arg>)
    -> Result<Reply, ApiError>;

    /// Elements the command chain currently points at.
    fn context(&self) -> CommandContext;

    /// The session this engine drives.
    fn session(&self) -> SessionInfo;

    /// Finds a single element from the current context.
    ///
    /// # Returns
    /// - `Ok(ElementHandle)` for the first match.
    /// - `Err(ApiError::NoSuchElement)` (or another engine error) otherwise.
    async fn find(&self, using: &str, value: &str) -> Result<ElementHandle, ApiError> {
        self.invoke(
            Method::Find,
            Target::Context,
            vec![Arg::from(using), Arg::from(value)],
        )
        .await?
        .into_element(Method::Find.as_str())
    }

    /// Finds every element matching the locator; an empty list is not an error.
    async fn find_all(&self, using: &str, value: &str) -> Result<Vec<ElementHandle>, ApiError> {
        self.invoke(
            Method::FindAll,
            Target::Context,
            vec![Arg::from(using), Arg::from(value)],
        )
        .await?
        .into_elements(Method::FindAll.as_str())
    }

    /// Executes a synchronous script in the page and returns its result.
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, ApiError> {
        let reply = self
            .invoke(
                Method::Execute,
                Target::Context,
                vec![Arg::from(script), Arg::Value(Value::Array(args))],
            )
            .await?;
        Ok(reply.into_value())
    }

    /// Currently configured implicit wait for element lookups, in milliseconds.
    async fn get_find_timeout(&self) -> Result<u64, ApiError> {
        let reply = self
            .invoke(Method::GetFindTimeout, Target::Context, Vec::new())
            .await?;
        reply.into_value().as_u64().ok_or(ApiError::UnexpectedReply {
            method: Method::GetFindTimeout.as_str().to_string(),
            expected: "a number of milliseconds",
        })
    }

    async fn set_find_timeout(&self, timeout_ms: u64) -> Result<(), ApiError> {
        self.invoke(
            Method::SetFindTimeout,
            Target::Context,
            vec![Arg::from(timeout_ms)],
        )
        .await
        .map(|_| ())
    }

    async fn is_displayed(&self, target: Target) -> Result<bool, ApiError> {
        self.invoke(Method::IsDisplayed, target, Vec::new())
            .await?
            .into_bool(Method::IsDisplayed.as_str())
    }

    async fn get_attribute(&self, target: Target, name: &str) -> Result<Value, ApiError> {
        let reply = self
            .invoke(Method::GetAttribute, target, vec![Arg::from(name)])
            .await?;
        Ok(reply.into_value())
    }

    /// Whether `target` and `other` refer to the same remote element.
    async fn equals(&self, target: Target, other: ElementHandle) -> Result<bool, ApiError> {
        self.invoke(Method::Equals, target, vec![Arg::Element(other)])
            .await?
            .into_bool(Method::Equals.as_str())
    }

    async fn get_visible_text(&self, target: Target) -> Result<String, ApiError> {
        self.invoke(Method::GetVisibleText, target, Vec::new())
            .await?
            .into_string(Method::GetVisibleText.as_str())
    }

    /// Reads an engine-internal property of an element (e.g. `pageIndex`).
    async fn get_property(&self, element: ElementHandle, name: &str) -> Result<Value, ApiError> {
        let reply = self
            .invoke(
                Method::GetProperty,
                Target::Element(element),
                vec![Arg::from(name)],
            )
            .await?;
        Ok(reply.into_value())
    }
}
