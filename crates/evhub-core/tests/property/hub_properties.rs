use std::sync::{Arc, Mutex};

use evhub_core::events::{EventHub, NamedEvent};
use proptest::prelude::*;

fn recording_hub(names: &[String]) -> (EventHub<NamedEvent>, Arc<Mutex<Vec<usize>>>) {
    let hub: EventHub<NamedEvent> = EventHub::with_config(evhub_core::HubConfig {
        max_listeners: Some(0),
        ..Default::default()
    });
    let log = Arc::new(Mutex::new(Vec::new()));
    for (index, name) in names.iter().enumerate() {
        let sink = Arc::clone(&log);
        hub.on(name.clone(), move |_: &NamedEvent| sink.lock().unwrap().push(index));
    }
    (hub, log)
}

proptest! {
    #[test]
    fn listeners_fire_in_registration_order(count in 1usize..40) {
        let names = vec!["evt".to_string(); count];
        let (hub, log) = recording_hub(&names);
        hub.notify(&NamedEvent::new("evt")).unwrap();
        let expected: Vec<usize> = (0..count).collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }

    #[test]
    fn notify_only_reaches_its_own_name(names in prop::collection::vec("[a-c]", 1..30), target in "[a-c]") {
        let (hub, log) = recording_hub(&names);
        hub.notify(&NamedEvent::new(target.clone())).unwrap();
        let expected: Vec<usize> = names
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == target)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }

    #[test]
    fn once_listeners_never_fire_twice(count in 1usize..20, rounds in 2usize..6) {
        let hub: EventHub<NamedEvent> = EventHub::with_config(evhub_core::HubConfig {
            max_listeners: Some(0),
            ..Default::default()
        });
        let log = Arc::new(Mutex::new(Vec::new()));
        for index in 0..count {
            let sink = Arc::clone(&log);
            hub.once("evt".to_string(), move |_: &NamedEvent| sink.lock().unwrap().push(index));
        }
        for _ in 0..rounds {
            hub.notify(&NamedEvent::new("evt")).unwrap();
        }
        let expected: Vec<usize> = (0..count).collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
        prop_assert_eq!(hub.listener_count(&"evt".to_string()), 0);
    }

    #[test]
    fn removed_listeners_never_fire(count in 1usize..30, remove_mask in prop::collection::vec(any::<bool>(), 30)) {
        let hub: EventHub<NamedEvent> = EventHub::with_config(evhub_core::HubConfig {
            max_listeners: Some(0),
            ..Default::default()
        });
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut ids = Vec::new();
        for index in 0..count {
            let sink = Arc::clone(&log);
            ids.push(hub.on("evt".to_string(), move |_: &NamedEvent| sink.lock().unwrap().push(index)));
        }
        for (index, id) in ids.iter().enumerate() {
            if remove_mask[index] {
                prop_assert!(hub.off(&"evt".to_string(), *id));
            }
        }
        hub.notify(&NamedEvent::new("evt")).unwrap();
        let expected: Vec<usize> = (0..count).filter(|i| !remove_mask[*i]).collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }
}
