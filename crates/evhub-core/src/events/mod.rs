//! Event system for evhub.
//! Typed payload per event family, synchronous dispatch, snapshot-per-pass.

pub mod dispatcher;
pub mod emitter;
pub mod handler;
pub mod report;
pub mod types;

pub use dispatcher::EventHub;
pub use emitter::Emitter;
pub use handler::{IntoListenerResult, Listener, ListenerId, ListenerResult};
pub use report::DispatchReport;
pub use types::{HubEvent, NamedEvent, ERROR_EVENT};
