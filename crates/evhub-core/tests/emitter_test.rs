//! Tests for owners that embed a hub and re-expose it through `Emitter`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use evhub_core::events::{DispatchReport, Emitter, EventHub, HubEvent, NamedEvent};
use evhub_core::HubError;

#[derive(Debug, Clone)]
enum ThermostatEvent {
    Reading(f64),
    Fault(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ThermostatEventName {
    Reading,
    Fault,
}

impl HubEvent for ThermostatEvent {
    type Name = ThermostatEventName;

    fn name(&self) -> ThermostatEventName {
        match self {
            ThermostatEvent::Reading(_) => ThermostatEventName::Reading,
            ThermostatEvent::Fault(_) => ThermostatEventName::Fault,
        }
    }

    fn error_name() -> Option<ThermostatEventName> {
        Some(ThermostatEventName::Fault)
    }

    fn from_listener_fault(fault: &HubError) -> Option<Self> {
        Some(ThermostatEvent::Fault(fault.to_string()))
    }
}

/// An owner that exposes its hub under subscribe/publish vocabulary.
struct Thermostat {
    events: EventHub<ThermostatEvent>,
}

impl Thermostat {
    fn new() -> Self {
        Self {
            events: EventHub::new(),
        }
    }

    fn record(&self, celsius: f64) -> Result<DispatchReport, HubError> {
        self.publish(&ThermostatEvent::Reading(celsius))
    }
}

impl Emitter for Thermostat {
    type Event = ThermostatEvent;

    fn hub(&self) -> &EventHub<ThermostatEvent> {
        &self.events
    }
}

#[test]
fn test_owner_reexposes_hub_operations() {
    let thermostat = Thermostat::new();
    let readings = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&readings);
    let id = thermostat.subscribe(ThermostatEventName::Reading, move |e: &ThermostatEvent| {
        if let ThermostatEvent::Reading(c) = e {
            sink.lock().unwrap().push(*c);
        }
    });

    thermostat.record(21.5).unwrap();
    assert!(thermostat.unsubscribe(&ThermostatEventName::Reading, id));
    thermostat.record(22.0).unwrap();

    assert_eq!(*readings.lock().unwrap(), vec![21.5]);
}

#[test]
fn test_owner_subscribe_once() {
    let thermostat = Thermostat::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let c = Arc::clone(&calls);
    thermostat.subscribe_once(ThermostatEventName::Reading, move |_: &ThermostatEvent| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    thermostat.record(1.0).unwrap();
    thermostat.record(2.0).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_owner_unheard_fault_is_an_error() {
    let thermostat = Thermostat::new();
    let result = thermostat.publish(&ThermostatEvent::Fault("sensor offline".into()));
    assert!(matches!(result, Err(HubError::UnhandledError { .. })));
}

#[test]
fn test_explicit_shared_bus() {
    // A process-wide bus is an explicitly constructed, explicitly passed Arc.
    let bus: Arc<EventHub<NamedEvent>> = Arc::new(EventHub::new());
    let seen = Arc::new(AtomicUsize::new(0));

    struct Producer {
        bus: Arc<EventHub<NamedEvent>>,
    }
    struct Consumer;

    impl Consumer {
        fn attach(bus: &EventHub<NamedEvent>, seen: Arc<AtomicUsize>) {
            bus.subscribe("job.done".into(), move |_: &NamedEvent| {
                seen.fetch_add(1, Ordering::SeqCst);
            });
        }
    }

    Consumer::attach(&bus, Arc::clone(&seen));
    let producer = Producer {
        bus: Arc::clone(&bus),
    };
    producer.bus.publish(&NamedEvent::new("job.done").arg(7)).unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
