//! Hub errors: unhandled error events and contained listener faults.

use super::error_code::{self, HubErrorCode};
use super::ConfigError;
use crate::events::handler::ListenerId;

/// Errors surfaced by the event hub.
///
/// `UnhandledError` is returned from `notify` directly. The listener
/// variants never abort a dispatch pass; they are collected into the
/// pass's `DispatchReport` instead.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("Unhandled error event {event}: {detail}")]
    UnhandledError { event: String, detail: String },

    #[error("Listener {listener} on {event} failed: {message}")]
    ListenerFailed {
        event: String,
        listener: ListenerId,
        message: String,
    },

    #[error("Listener {listener} on {event} panicked: {message}")]
    ListenerPanicked {
        event: String,
        listener: ListenerId,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl HubError {
    /// Returns true for faults raised by a listener during dispatch.
    pub fn is_listener_fault(&self) -> bool {
        matches!(
            self,
            Self::ListenerFailed { .. } | Self::ListenerPanicked { .. }
        )
    }

    /// The listener that raised this fault, if any.
    pub fn listener(&self) -> Option<ListenerId> {
        match self {
            Self::ListenerFailed { listener, .. } | Self::ListenerPanicked { listener, .. } => {
                Some(*listener)
            }
            _ => None,
        }
    }
}

impl HubErrorCode for HubError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnhandledError { .. } => error_code::UNHANDLED_ERROR,
            Self::ListenerFailed { .. } => error_code::LISTENER_FAILED,
            Self::ListenerPanicked { .. } => error_code::LISTENER_PANICKED,
            Self::Config(e) => e.error_code(),
        }
    }
}
