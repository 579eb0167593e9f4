//! Tracing/logging configuration.

use serde::{Deserialize, Serialize};

/// Filter used when neither `EVHUB_LOG` nor the config provides one.
pub const DEFAULT_LOG_FILTER: &str = "evhub=info";

/// Configuration for `init_tracing_with`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TracingConfig {
    /// `EnvFilter` directive string, e.g. `evhub_core=debug`. Default: `evhub=info`.
    /// `EVHUB_LOG` takes precedence at init time.
    pub filter: Option<String>,
    /// Include thread ids in log lines. Default: true.
    pub thread_ids: Option<bool>,
    /// Include source file and line in log lines. Default: false.
    pub source_location: Option<bool>,
}

impl TracingConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn effective_thread_ids(&self) -> bool {
        self.thread_ids.unwrap_or(true)
    }

    pub fn effective_source_location(&self) -> bool {
        self.source_location.unwrap_or(false)
    }

    pub(crate) fn merge(&mut self, other: &TracingConfig) {
        if other.filter.is_some() {
            self.filter = other.filter.clone();
        }
        if other.thread_ids.is_some() {
            self.thread_ids = other.thread_ids;
        }
        if other.source_location.is_some() {
            self.source_location = other.source_location;
        }
    }
}
