//! # evhub-core
//!
//! Synchronous in-process event hub.
//!
//! An [`EventHub`] maps event names to ordered listener lists. Producers call
//! [`EventHub::notify`]; every listener currently registered for the event's
//! name runs on the caller's thread, in registration order. Payloads are
//! typed per event family through [`HubEvent`]; [`NamedEvent`] offers
//! string-keyed dispatch with JSON arguments.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use evhub_core::{EventHub, NamedEvent};
//!
//! let hub: EventHub<NamedEvent> = EventHub::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! hub.on("greet".into(), move |e: &NamedEvent| {
//!     sink.lock().unwrap().push(e.arg_str(0).unwrap_or_default().to_string());
//! });
//!
//! hub.notify(&NamedEvent::new("greet").arg("Alice")).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec!["Alice".to_string()]);
//!
//! // The reserved "error" event must not go unheard.
//! assert!(hub.notify(&NamedEvent::error("boom")).is_err());
//! ```

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;

pub use config::{EvhubConfig, HubConfig, HubOverrides, TracingConfig};
pub use errors::{ConfigError, HubError, HubErrorCode};
pub use events::{
    DispatchReport, Emitter, EventHub, HubEvent, IntoListenerResult, Listener, ListenerId,
    ListenerResult, NamedEvent, ERROR_EVENT,
};
