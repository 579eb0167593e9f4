//! Top-level evhub configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::{HubConfig, TracingConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the root passed to `load`.
pub const PROJECT_CONFIG_FILE: &str = "evhub.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`EVHUB_*`)
/// 3. Project config (`evhub.toml` in project root)
/// 4. User config (`~/.evhub/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EvhubConfig {
    pub hub: HubConfig,
    pub tracing: TracingConfig,
}

/// Programmatic overrides, the highest-priority layer.
#[derive(Debug, Clone, Default)]
pub struct HubOverrides {
    pub max_listeners: Option<usize>,
    pub catch_panics: Option<bool>,
    pub reroute_faults: Option<bool>,
    pub log_filter: Option<String>,
}

impl EvhubConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&HubOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        tracing::debug!(?config, "evhub config resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &EvhubConfig) -> Result<(), ConfigError> {
        if let Some(ref filter) = config.tracing.filter {
            if let Err(e) = EnvFilter::try_new(filter) {
                return Err(ConfigError::ValidationFailed {
                    field: "tracing.filter".to_string(),
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.evhub/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".evhub").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut EvhubConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EvhubConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.hub.merge(&file_config.hub);
        config.tracing.merge(&file_config.tracing);
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut EvhubConfig) {
        if let Ok(val) = std::env::var("EVHUB_MAX_LISTENERS") {
            if let Ok(v) = val.parse::<usize>() {
                config.hub.max_listeners = Some(v);
            }
        }
        if let Ok(val) = std::env::var("EVHUB_CATCH_PANICS") {
            if let Ok(v) = val.parse::<bool>() {
                config.hub.catch_panics = Some(v);
            }
        }
        if let Ok(val) = std::env::var("EVHUB_REROUTE_FAULTS") {
            if let Ok(v) = val.parse::<bool>() {
                config.hub.reroute_faults = Some(v);
            }
        }
    }

    fn apply_overrides(config: &mut EvhubConfig, overrides: &HubOverrides) {
        if let Some(v) = overrides.max_listeners {
            config.hub.max_listeners = Some(v);
        }
        if let Some(v) = overrides.catch_panics {
            config.hub.catch_panics = Some(v);
        }
        if let Some(v) = overrides.reroute_faults {
            config.hub.reroute_faults = Some(v);
        }
        if let Some(ref v) = overrides.log_filter {
            config.tracing.filter = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
