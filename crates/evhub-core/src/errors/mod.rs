//! Error handling for evhub.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod hub_error;

pub use config_error::ConfigError;
pub use error_code::HubErrorCode;
pub use hub_error::HubError;
