use thiserror::Error;

/// Errors surfaced by the command engine and by the legacy layer on top of it.
///
/// Engine failures pass through the legacy layer unchanged; the variants below
/// `NotSupported` are raised by the legacy layer itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Failed to establish or maintain a connection to the remote end.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An operation did not complete within the configured timeout.
    #[error("Operation timed out")]
    Timeout,

    /// The remote end rejected the command or answered with an unexpected payload.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// No element matched the given locator.
    #[error("No such element: {using}={value}")]
    NoSuchElement { using: String, value: String },

    /// The element reference is no longer attached to the document.
    #[error("Stale element reference: {0}")]
    StaleElement(String),

    /// A script passed to `execute`/`executeAsync` threw.
    #[error("Script execution failed: {0}")]
    ScriptError(String),

    /// Invalid parameters were provided to a command.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The engine does not implement the requested command.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// `waitForVisible` found the element but it never got a non-zero size.
    #[error("Element didn't become visible: {using}={value}")]
    ElementNotVisible { using: String, value: String },

    /// `waitForCondition` polled until its deadline without a truthy result.
    #[error("Condition was not met within {timeout_ms}ms: {expression}")]
    ConditionTimeout { expression: String, timeout_ms: u64 },

    /// The wrapped operation succeeded but putting the original setting back failed.
    #[error("Failed to restore {setting}: {reason}")]
    SettingRestore { setting: String, reason: String },

    /// No legacy member with that name is installed on the command.
    #[error("Unknown command member: {0}")]
    UnknownMember(String),

    /// The engine answered a command with a reply of the wrong shape.
    #[error("Unexpected reply to {method}: expected {expected}")]
    UnexpectedReply { method: String, expected: &'static str },

    /// An internal error occurred; this may indicate a bug.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ProtocolError(err.to_string())
    }
}
