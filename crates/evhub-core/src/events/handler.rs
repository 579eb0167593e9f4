//! Listener trait, closure adapter, and per-registration bookkeeping.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::HubEvent;

/// Outcome of a single listener call. The error carries a human-readable
/// message that ends up in `HubError::ListenerFailed`.
pub type ListenerResult = Result<(), String>;

/// Handle returned by every registration call, usable with `EventHub::off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Raw numeric value of the handle.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Trait for reacting to notifications of an event family.
///
/// Any `Fn(&E) -> R` closure is a listener when `R` is `()` or a
/// `Result<(), impl Display>`, so most callers never implement this by hand.
/// Implement it directly for stateful handlers that are shared via `Arc`.
pub trait Listener<E: HubEvent>: Send + Sync {
    fn on_event(&self, event: &E) -> ListenerResult;
}

/// Conversion from a listener's return value into a `ListenerResult`.
pub trait IntoListenerResult {
    fn into_listener_result(self) -> ListenerResult;
}

impl IntoListenerResult for () {
    fn into_listener_result(self) -> ListenerResult {
        Ok(())
    }
}

impl<Err: fmt::Display> IntoListenerResult for Result<(), Err> {
    fn into_listener_result(self) -> ListenerResult {
        self.map_err(|e| e.to_string())
    }
}

impl<E, F, R> Listener<E> for F
where
    E: HubEvent,
    F: Fn(&E) -> R + Send + Sync,
    R: IntoListenerResult,
{
    fn on_event(&self, event: &E) -> ListenerResult {
        self(event).into_listener_result()
    }
}

/// One entry in a name's listener sequence.
pub(crate) struct Registration<E: HubEvent> {
    pub(crate) id: ListenerId,
    pub(crate) listener: Arc<dyn Listener<E>>,
    pub(crate) once: bool,
    fired: AtomicBool,
}

impl<E: HubEvent> Registration<E> {
    pub(crate) fn new(id: ListenerId, listener: Arc<dyn Listener<E>>, once: bool) -> Self {
        Self {
            id,
            listener,
            once,
            fired: AtomicBool::new(false),
        }
    }

    /// Claim the right to invoke this registration.
    ///
    /// Always succeeds for persistent listeners. For one-shot listeners only
    /// the first caller wins, whichever (possibly nested) pass it comes from.
    pub(crate) fn claim(&self) -> bool {
        !self.once || !self.fired.swap(true, Ordering::AcqRel)
    }

    /// True if `listener` points at the same allocation as this handler.
    pub(crate) fn is_same_handler<L: ?Sized>(&self, listener: &Arc<L>) -> bool {
        Arc::as_ptr(&self.listener).cast::<()>() == Arc::as_ptr(listener).cast::<()>()
    }
}

impl<E: HubEvent> fmt::Debug for Registration<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("once", &self.once)
            .field("fired", &self.fired.load(Ordering::Relaxed))
            .finish()
    }
}
