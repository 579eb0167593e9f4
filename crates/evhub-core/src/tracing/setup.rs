//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::tracing_config::{TracingConfig, DEFAULT_LOG_FILTER};

static INIT: Once = Once::new();

/// Environment variable holding per-target log levels.
pub const LOG_ENV_VAR: &str = "EVHUB_LOG";

/// Initialize evhub logging with default settings.
///
/// Reads `EVHUB_LOG` for per-target log levels.
/// Format: `EVHUB_LOG=evhub_core=debug,my_app=info`
///
/// Falls back to `evhub=info` if `EVHUB_LOG` is not set or is invalid.
pub fn init_tracing() {
    init_tracing_with(&TracingConfig::default());
}

/// Initialize evhub logging from a `TracingConfig`.
///
/// `EVHUB_LOG` wins over `config.filter`; an invalid directive at either
/// level falls through to the next one. Idempotent, and a no-op when the
/// host process already installed a global subscriber.
pub fn init_tracing_with(config: &TracingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config);

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(config.effective_thread_ids())
                    .with_file(config.effective_source_location())
                    .with_line_number(config.effective_source_location()),
            )
            .with(filter)
            .try_init();

        if installed.is_err() {
            tracing::debug!("global subscriber already set, keeping it");
        }
    });
}

/// Pick the log filter: `EVHUB_LOG`, then `config.filter`, then `evhub=info`.
/// An unset or unparseable level falls through to the next one.
pub fn resolve_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(config.effective_filter()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
