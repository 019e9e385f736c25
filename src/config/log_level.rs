//! Client log level definitions.
//!
//! The client log level decides which optional entries the API client emits
//! on top of the always-on error logging, and whether the platform's `debug`
//! system parameter is sent.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Verbosity of the API client.
///
/// - `Debug`: sends `debug=true` with every call and logs an informational
///   entry for successful calls
/// - `Info`: logs an informational entry for successful calls
/// - `Error`: only API and transport errors are logged (default)
///
/// # Example
///
/// ```rust
/// use daraz_sdk::LogLevel;
///
/// let level: LogLevel = "info".parse().unwrap();
/// assert_eq!(level, LogLevel::Info);
/// assert_eq!(level.to_string(), "INFO");
/// assert_eq!(LogLevel::default(), LogLevel::Error);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Verbose: includes the platform debug flag.
    Debug,
    /// Informational entries for successful calls.
    Info,
    /// Errors only.
    #[default]
    Error,
}

impl LogLevel {
    /// Returns `true` if successful calls should be logged.
    #[must_use]
    pub const fn logs_success(self) -> bool {
        matches!(self, Self::Debug | Self::Info)
    }

    /// Returns `true` if the platform `debug` system parameter should be sent.
    #[must_use]
    pub const fn sends_debug_flag(self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "ERROR" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidLogLevel {
                level: s.to_string(),
            }),
        }
    }
}
