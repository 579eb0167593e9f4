//! Configuration system for evhub.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod evhub_config;
pub mod hub_config;
pub mod tracing_config;

pub use evhub_config::{EvhubConfig, HubOverrides};
pub use hub_config::HubConfig;
pub use tracing_config::TracingConfig;
