//! Observability for evhub.
//! `tracing` crate with `EnvFilter`, overridable through `EVHUB_LOG`.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with, resolve_filter};
