//! Event hub configuration.

use serde::{Deserialize, Serialize};

/// Default leak-warning threshold per event name.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Configuration for an `EventHub`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HubConfig {
    /// Listener count per name above which a leak warning is logged.
    /// `0` disables the warning. Default: 10.
    pub max_listeners: Option<usize>,
    /// Contain listener panics instead of unwinding through `notify`. Default: true.
    pub catch_panics: Option<bool>,
    /// Re-surface contained faults through the error event. Default: false.
    pub reroute_faults: Option<bool>,
}

impl HubConfig {
    /// Returns the effective leak-warning threshold, defaulting to 10.
    pub fn effective_max_listeners(&self) -> usize {
        self.max_listeners.unwrap_or(DEFAULT_MAX_LISTENERS)
    }

    pub fn effective_catch_panics(&self) -> bool {
        self.catch_panics.unwrap_or(true)
    }

    pub fn effective_reroute_faults(&self) -> bool {
        self.reroute_faults.unwrap_or(false)
    }

    /// Overlay the `Some` fields of `other` onto `self`.
    pub(crate) fn merge(&mut self, other: &HubConfig) {
        if other.max_listeners.is_some() {
            self.max_listeners = other.max_listeners;
        }
        if other.catch_panics.is_some() {
            self.catch_panics = other.catch_panics;
        }
        if other.reroute_faults.is_some() {
            self.reroute_faults = other.reroute_faults;
        }
    }
}
