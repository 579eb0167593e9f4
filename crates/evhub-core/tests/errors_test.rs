//! Tests for the evhub error handling system.

use std::collections::HashSet;

use evhub_core::errors::*;
use evhub_core::events::{EventHub, NamedEvent};

fn sample_errors() -> Vec<HubError> {
    let hub: EventHub<NamedEvent> = EventHub::new();
    let failed = hub.on("tick".into(), |_: &NamedEvent| -> Result<(), &'static str> {
        Err("nope")
    });
    let mut report = hub.notify(&NamedEvent::new("tick")).unwrap();
    assert_eq!(report.faults[0].listener(), Some(failed));

    vec![
        hub.notify(&NamedEvent::error("unheard")).unwrap_err(),
        report.faults.remove(0),
        HubError::ListenerPanicked {
            event: "\"tick\"".into(),
            listener: failed,
            message: "boom".into(),
        },
        ConfigError::FileNotFound {
            path: "/tmp/evhub.toml".into(),
        }
        .into(),
    ]
}

#[test]
fn test_every_variant_has_error_code() {
    for error in sample_errors() {
        assert!(!error.error_code().is_empty());
    }
    let config = ConfigError::ValidationFailed {
        field: "tracing.filter".into(),
        message: "bad".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);
}

#[test]
fn test_config_error_converts_into_hub_error() {
    let config = ConfigError::ParseError {
        path: "evhub.toml".into(),
        message: "expected `=`".into(),
    };
    let hub_error: HubError = config.into();
    assert!(matches!(hub_error, HubError::Config(ConfigError::ParseError { .. })));
    assert_eq!(hub_error.error_code(), error_code::CONFIG_ERROR);
    assert!(!hub_error.is_listener_fault());
    assert_eq!(hub_error.listener(), None);
}

#[test]
fn test_coded_string_format() {
    let err = ConfigError::FileNotFound {
        path: "/tmp/x.toml".into(),
    };
    assert_eq!(err.coded_string(), "[CONFIG_ERROR] Config file not found: /tmp/x.toml");

    let unhandled = HubError::UnhandledError {
        event: "\"error\"".into(),
        detail: "disk full".into(),
    };
    assert_eq!(
        unhandled.coded_string(),
        "[UNHANDLED_ERROR] Unhandled error event \"error\": disk full"
    );
}

#[test]
fn test_display_human_readable() {
    for error in sample_errors() {
        let msg = error.to_string();
        assert!(!msg.is_empty());
        assert!(msg.contains("tick") || msg.contains("error") || msg.contains("Config"), "{}", msg);
    }
}

#[test]
fn test_error_codes_unique() {
    let codes = [
        error_code::UNHANDLED_ERROR,
        error_code::LISTENER_FAILED,
        error_code::LISTENER_PANICKED,
        error_code::CONFIG_ERROR,
    ];
    let unique: HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());
}
