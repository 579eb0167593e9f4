//! EventHub: synchronous, re-entrant event dispatch keyed by event name.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::handler::{IntoListenerResult, Listener, ListenerId, Registration};
use super::report::DispatchReport;
use super::types::HubEvent;
use crate::config::HubConfig;
use crate::errors::HubError;

/// Listener snapshot taken at the start of a pass. Most names have a
/// handful of listeners, so this rarely allocates.
type Snapshot<E> = SmallVec<[Arc<Registration<E>>; 8]>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Placement {
    Back,
    Front,
}

struct Registry<E: HubEvent> {
    by_name: FxHashMap<E::Name, Vec<Arc<Registration<E>>>>,
    /// Names that already triggered the leak warning.
    warned: FxHashSet<E::Name>,
}

/// Registry of listeners per event name plus the dispatch loop.
///
/// All methods take `&self`. The registry lock is never held while a
/// listener runs, so listeners may register, remove, or notify re-entrantly.
/// Each `notify` works on a snapshot of the name's listeners taken when the
/// pass starts; changes made during the pass apply from the next pass on.
///
/// Fault policy: a listener that returns an error or panics is contained,
/// logged, and recorded in the pass's `DispatchReport`; remaining listeners
/// still run. Panics unwind through `notify` only when `catch_panics` is off.
pub struct EventHub<E: HubEvent> {
    registry: Mutex<Registry<E>>,
    next_id: AtomicU64,
    config: HubConfig,
}

impl<E: HubEvent> EventHub<E> {
    /// Create an empty hub with default configuration.
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    pub fn with_config(config: HubConfig) -> Self {
        Self {
            registry: Mutex::new(Registry {
                by_name: FxHashMap::default(),
                warned: FxHashSet::default(),
            }),
            next_id: AtomicU64::new(1),
            config,
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    // ---- Registration ----

    /// Append `listener` to the listeners of `name`.
    pub fn on<F, R>(&self, name: E::Name, listener: F) -> ListenerId
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.insert(name, Arc::new(listener), false, Placement::Back)
    }

    /// Append a listener that is removed right before its first invocation.
    pub fn once<F, R>(&self, name: E::Name, listener: F) -> ListenerId
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.insert(name, Arc::new(listener), true, Placement::Back)
    }

    /// Insert `listener` ahead of every listener already registered for `name`.
    pub fn prepend<F, R>(&self, name: E::Name, listener: F) -> ListenerId
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.insert(name, Arc::new(listener), false, Placement::Front)
    }

    pub fn prepend_once<F, R>(&self, name: E::Name, listener: F) -> ListenerId
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.insert(name, Arc::new(listener), true, Placement::Front)
    }

    /// Append a shared listener. Keep the `Arc` to remove it later with
    /// `remove_listener`.
    pub fn on_arc<L: Listener<E> + 'static>(&self, name: E::Name, listener: Arc<L>) -> ListenerId {
        self.insert(name, listener, false, Placement::Back)
    }

    pub fn once_arc<L: Listener<E> + 'static>(&self, name: E::Name, listener: Arc<L>) -> ListenerId {
        self.insert(name, listener, true, Placement::Back)
    }

    fn insert(
        &self,
        name: E::Name,
        listener: Arc<dyn Listener<E>>,
        once: bool,
        placement: Placement,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let registration = Arc::new(Registration::new(id, listener, once));

        let (count, warn_leak) = {
            let mut registry = self.registry.lock();
            let listeners = registry.by_name.entry(name.clone()).or_default();
            match placement {
                Placement::Back => listeners.push(registration),
                Placement::Front => listeners.insert(0, registration),
            }
            let count = listeners.len();
            let max = self.config.effective_max_listeners();
            let warn_leak = max > 0 && count > max && registry.warned.insert(name.clone());
            (count, warn_leak)
        };

        tracing::debug!(event = ?name, listener = %id, once, count, "listener registered");
        if warn_leak {
            tracing::warn!(
                event = ?name,
                count,
                max = self.config.effective_max_listeners(),
                "possible listener leak: listener count exceeds configured maximum"
            );
        }
        id
    }

    // ---- Removal ----

    /// Remove the registration `id` from `name`. Returns false if absent.
    pub fn off(&self, name: &E::Name, id: ListenerId) -> bool {
        let removed = self.detach(name, |r| r.id == id);
        if removed {
            tracing::debug!(event = ?name, listener = %id, "listener removed");
        }
        removed
    }

    /// Remove the first registration of `name` whose handler is `listener`.
    /// Returns false if no registration matches.
    pub fn remove_listener<L: ?Sized>(&self, name: &E::Name, listener: &Arc<L>) -> bool {
        let removed = self.detach(name, |r| r.is_same_handler(listener));
        if removed {
            tracing::debug!(event = ?name, "listener removed by handler");
        }
        removed
    }

    /// Remove every listener of `name`, or of every name when `None`.
    /// Returns how many registrations were dropped.
    pub fn remove_all(&self, name: Option<&E::Name>) -> usize {
        let removed = {
            let mut registry = self.registry.lock();
            match name {
                Some(name) => {
                    registry.warned.remove(name);
                    registry.by_name.remove(name).map_or(0, |l| l.len())
                }
                None => {
                    registry.warned.clear();
                    registry.by_name.drain().map(|(_, l)| l.len()).sum()
                }
            }
        };
        tracing::debug!(event = ?name, removed, "listeners cleared");
        removed
    }

    /// Remove the first registration matching `pred`, dropping the name's
    /// entry once it has no listeners left.
    fn detach(&self, name: &E::Name, pred: impl Fn(&Registration<E>) -> bool) -> bool {
        let mut registry = self.registry.lock();
        let Some(listeners) = registry.by_name.get_mut(name) else {
            return false;
        };
        let Some(pos) = listeners.iter().position(|r| pred(&**r)) else {
            return false;
        };
        listeners.remove(pos);
        if listeners.is_empty() {
            registry.by_name.remove(name);
        }
        true
    }

    // ---- Introspection ----

    pub fn listener_count(&self, name: &E::Name) -> usize {
        self.registry.lock().by_name.get(name).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, name: &E::Name) -> bool {
        self.listener_count(name) > 0
    }

    /// Listeners across all names.
    pub fn total_listeners(&self) -> usize {
        self.registry.lock().by_name.values().map(Vec::len).sum()
    }

    /// Names with at least one listener, in no particular order.
    pub fn event_names(&self) -> Vec<E::Name> {
        self.registry.lock().by_name.keys().cloned().collect()
    }

    /// Handlers currently registered for `name`, in dispatch order.
    pub fn listeners(&self, name: &E::Name) -> Vec<Arc<dyn Listener<E>>> {
        self.registry
            .lock()
            .by_name
            .get(name)
            .map(|l| l.iter().map(|r| Arc::clone(&r.listener)).collect())
            .unwrap_or_default()
    }

    // ---- Dispatch ----

    /// Synchronously invoke every listener of `event.name()` in order.
    ///
    /// Returns `Err(HubError::UnhandledError)` when `event` belongs to the
    /// family's reserved error name and nobody listens for it. Listener
    /// faults never produce `Err`; they are reported in the `DispatchReport`.
    pub fn notify(&self, event: &E) -> Result<DispatchReport, HubError> {
        self.dispatch(event, self.config.effective_reroute_faults())
    }

    /// One notification pass. Passes started by fault rerouting run with
    /// `reroute` off, so rerouting never nests.
    fn dispatch(&self, event: &E, reroute: bool) -> Result<DispatchReport, HubError> {
        let name = event.name();
        let is_error_event = E::error_name().is_some_and(|error_name| error_name == name);
        let snapshot = self.snapshot(&name);

        if snapshot.is_empty() {
            if is_error_event {
                tracing::error!(event = ?name, payload = ?event, "error event has no listener");
                return Err(HubError::UnhandledError {
                    event: format!("{name:?}"),
                    detail: format!("{event:?}"),
                });
            }
            tracing::trace!(event = ?name, "no listeners");
            return Ok(DispatchReport::default());
        }

        let span = tracing::trace_span!("notify", event = ?name, listeners = snapshot.len());
        let _guard = span.enter();

        let mut report = DispatchReport::default();
        for registration in snapshot {
            if registration.once {
                if !registration.claim() {
                    report.skipped += 1;
                    continue;
                }
                // Detach before the call so a nested pass cannot see it.
                let id = registration.id;
                self.detach(&name, |r| r.id == id);
            }

            report.invoked += 1;
            if let Err(fault) = self.invoke(&name, &registration, event) {
                tracing::warn!(event = ?name, listener = %registration.id, error = %fault, "listener fault contained");
                report.add_fault(fault);
            }
        }

        if reroute && !is_error_event && !report.is_clean() {
            self.reroute_faults(&mut report);
        }

        Ok(report)
    }

    fn snapshot(&self, name: &E::Name) -> Snapshot<E> {
        self.registry
            .lock()
            .by_name
            .get(name)
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn invoke(&self, name: &E::Name, registration: &Registration<E>, event: &E) -> Result<(), HubError> {
        let outcome = if self.config.effective_catch_panics() {
            match panic::catch_unwind(AssertUnwindSafe(|| registration.listener.on_event(event))) {
                Ok(outcome) => outcome,
                Err(payload) => {
                    return Err(HubError::ListenerPanicked {
                        event: format!("{name:?}"),
                        listener: registration.id,
                        message: panic_message(payload.as_ref()),
                    });
                }
            }
        } else {
            registration.listener.on_event(event)
        };

        outcome.map_err(|message| HubError::ListenerFailed {
            event: format!("{name:?}"),
            listener: registration.id,
            message,
        })
    }

    /// Re-surface the pass's faults through the payloads built by
    /// `E::from_listener_fault`. Faults raised while delivering them are
    /// appended to the report but never rerouted again, whatever name the
    /// payload is notified under.
    fn reroute_faults(&self, report: &mut DispatchReport) {
        let fault_events: Vec<E> = report.faults.iter().filter_map(E::from_listener_fault).collect();
        for fault_event in fault_events {
            let target = fault_event.name();
            if !self.has_listeners(&target) {
                tracing::debug!(event = ?target, "no listener for rerouted fault, kept in report");
                continue;
            }
            match self.dispatch(&fault_event, false) {
                Ok(nested) => {
                    report.rerouted += 1;
                    report.absorb(nested);
                }
                // The last listener may have removed itself mid-reroute.
                Err(e) => tracing::debug!(error = %e, "fault reroute dropped"),
            }
        }
    }
}

impl<E: HubEvent> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HubEvent> fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        let counts: Vec<(&E::Name, usize)> =
            registry.by_name.iter().map(|(name, l)| (name, l.len())).collect();
        f.debug_struct("EventHub")
            .field("listeners", &counts)
            .field("config", &self.config)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
