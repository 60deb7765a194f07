use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// JSON key the W3C protocol uses for element references.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Handle to a remote element.
///
/// The id is opaque to this layer; it only ever travels back to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    #[serde(rename = "ELEMENT", alias = "element-6066-11e4-a52e-4f735466cecf")]
    pub element_id: String,
}

impl ElementHandle {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    /// Element reference in the form remote scripts receive as `arguments[n]`.
    pub fn to_json(&self) -> Value {
        json!({
            "ELEMENT": self.element_id,
            W3C_ELEMENT_KEY: self.element_id,
        })
    }
}

/// A single argument of a legacy call.
///
/// Legacy callers used to pass element handles and plain values through the same
/// positional slots; the variant records which one the caller meant.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Element(ElementHandle),
    Value(Value),
}

impl Arg {
    pub fn as_element(&self) -> Option<&ElementHandle> {
        match self {
            Arg::Element(element) => Some(element),
            Arg::Value(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Arg::Element(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Arg::Value(Value::Number(_)))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Value(value) => value.as_str(),
            Arg::Element(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Arg::Value(value) => value.as_u64(),
            Arg::Element(_) => None,
        }
    }

    /// Wire form of the argument; elements become element references.
    pub fn to_value(&self) -> Value {
        match self {
            Arg::Element(element) => element.to_json(),
            Arg::Value(value) => value.clone(),
        }
    }
}

impl From<ElementHandle> for Arg {
    fn from(element: ElementHandle) -> Self {
        Arg::Element(element)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Value(Value::from(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Value(Value::from(value))
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Arg::Value(Value::from(value))
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Value(Value::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Value(Value::from(value))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Value(Value::from(value))
    }
}

/// What a command operates on.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Whatever the command chain currently points at (session or found elements).
    Context,
    Element(ElementHandle),
}

/// Elements the command chain currently points at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandContext {
    pub elements: Vec<ElementHandle>,
    /// True when the context came from a single-element lookup.
    pub is_single: bool,
}

impl CommandContext {
    pub fn single(element: ElementHandle) -> Self {
        Self {
            elements: vec![element],
            is_single: true,
        }
    }

    pub fn many(elements: Vec<ElementHandle>) -> Self {
        Self {
            elements,
            is_single: false,
        }
    }
}

/// Session details the legacy accessors expose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    #[serde(default)]
    pub capabilities: Value,
}

/// Outcome of a command.
///
/// `Value(Null)` and `Undefined` are distinct: several legacy calls report
/// "nothing found" with one or the other and callers tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Undefined,
    Value(Value),
    Element(ElementHandle),
    Elements(Vec<ElementHandle>),
    /// The command chain itself, returned unchanged.
    Chain,
}

impl Reply {
    pub fn into_element(self, method: &str) -> Result<ElementHandle, ApiError> {
        match self {
            Reply::Element(element) => Ok(element),
            _ => Err(unexpected(method, "an element")),
        }
    }

    pub fn into_elements(self, method: &str) -> Result<Vec<ElementHandle>, ApiError> {
        match self {
            Reply::Elements(elements) => Ok(elements),
            Reply::Element(element) => Ok(vec![element]),
            _ => Err(unexpected(method, "a list of elements")),
        }
    }

    pub fn into_bool(self, method: &str) -> Result<bool, ApiError> {
        match self {
            Reply::Value(Value::Bool(flag)) => Ok(flag),
            _ => Err(unexpected(method, "a boolean")),
        }
    }

    pub fn into_string(self, method: &str) -> Result<String, ApiError> {
        match self {
            Reply::Value(Value::String(text)) => Ok(text),
            _ => Err(unexpected(method, "a string")),
        }
    }

    /// JSON view of the reply. Elements become element references, `Undefined`
    /// and `Chain` become `null`.
    pub fn into_value(self) -> Value {
        match self {
            Reply::Value(value) => value,
            Reply::Element(element) => element.to_json(),
            Reply::Elements(elements) => {
                Value::Array(elements.iter().map(ElementHandle::to_json).collect())
            }
            Reply::Undefined | Reply::Chain => Value::Null,
        }
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Reply::Value(value)
    }
}

impl From<bool> for Reply {
    fn from(flag: bool) -> Self {
        Reply::Value(Value::Bool(flag))
    }
}

fn unexpected(method: &str, expected: &'static str) -> ApiError {
    ApiError::UnexpectedReply {
        method: method.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_reference_carries_both_keys() {
        let value = ElementHandle::new("abc").to_json();
        assert_eq!(value["ELEMENT"], "abc");
        assert_eq!(value[W3C_ELEMENT_KEY], "abc");
    }

    #[test]
    fn element_handle_reads_w3c_key() {
        let handle: ElementHandle =
            serde_json::from_value(json!({ W3C_ELEMENT_KEY: "xyz" })).unwrap();
        assert_eq!(handle.element_id, "xyz");
    }

    #[test]
    fn only_json_numbers_count_as_numeric() {
        assert!(Arg::from(500u64).is_number());
        assert!(Arg::from(12.5).is_number());
        assert!(!Arg::from("500").is_number());
        assert!(!Arg::from(ElementHandle::new("h")).is_number());
    }

    #[test]
    fn null_and_undefined_stay_distinct() {
        assert_ne!(Reply::Value(Value::Null), Reply::Undefined);
        assert_eq!(Reply::Undefined.into_value(), Value::Null);
    }

    #[test]
    fn wrong_reply_shape_is_reported() {
        let err = Reply::Value(json!(3)).into_bool("isDisplayed").unwrap_err();
        assert_eq!(
            err,
            ApiError::UnexpectedReply {
                method: "isDisplayed".to_string(),
                expected: "a boolean"
            }
        );
    }
}
