//! HubErrorCode trait for structured error reporting.

/// Trait for mapping evhub errors to stable error code strings.
/// Every error enum implements this so callers can branch on a code
/// instead of matching on display text.
pub trait HubErrorCode {
    /// Returns the error code string (e.g., "UNHANDLED_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const UNHANDLED_ERROR: &str = "UNHANDLED_ERROR";
pub const LISTENER_FAILED: &str = "LISTENER_FAILED";
pub const LISTENER_PANICKED: &str = "LISTENER_PANICKED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
