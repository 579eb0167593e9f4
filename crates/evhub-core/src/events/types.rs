//! Event families: the `HubEvent` trait and the string-keyed `NamedEvent`.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{HubError, HubErrorCode};

/// Reserved name of the error event in the `NamedEvent` family.
pub const ERROR_EVENT: &str = "error";

/// A family of events sharing one hub.
///
/// Each payload knows the name it is notified under, so listeners receive a
/// fixed, compile-time checked type instead of an untyped argument list.
/// Typically implemented by an enum whose variants carry the payload of
/// each event, with `Name` a fieldless mirror of the variants.
pub trait HubEvent: fmt::Debug + Send + Sync + Sized + 'static {
    /// Key under which listeners are registered.
    type Name: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// The name this payload is notified under.
    fn name(&self) -> Self::Name;

    /// The reserved error name of this family, if it has one.
    ///
    /// Notifying this name with no listener registered fails with
    /// `HubError::UnhandledError` instead of being dropped.
    fn error_name() -> Option<Self::Name> {
        None
    }

    /// Build an error payload describing a contained listener fault.
    /// Only consulted when fault rerouting is enabled.
    fn from_listener_fault(_fault: &HubError) -> Option<Self> {
        None
    }
}

/// Dynamic event keyed by a string name, carrying ordered JSON arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEvent {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl NamedEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// An `"error"` event carrying `detail` as its single argument.
    pub fn error(detail: impl Into<Value>) -> Self {
        Self::new(ERROR_EVENT).arg(detail)
    }

    /// Append an argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn first_arg(&self) -> Option<&Value> {
        self.args.first()
    }

    /// The argument at `index` as a string slice, if it is a JSON string.
    pub fn arg_str(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(Value::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.name == ERROR_EVENT
    }
}

impl HubEvent for NamedEvent {
    type Name = String;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn error_name() -> Option<String> {
        Some(ERROR_EVENT.to_string())
    }

    fn from_listener_fault(fault: &HubError) -> Option<Self> {
        Some(Self::error(fault.to_string()).arg(fault.error_code()))
    }
}
