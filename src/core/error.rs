//! Error handling and error types for tabprep.
//!
//! Every fallible operation in the crate returns [`Result`], whose error
//! side is [`TabprepError`]. The four domain categories (input, config,
//! state, schema) are raised synchronously by the call that detects them;
//! nothing is retried internally.

use std::io;
use thiserror::Error;

/// Main error type for the tabprep library.
#[derive(Error, Debug)]
pub enum TabprepError {
    /// Malformed or mismatched input shapes
    #[error("Input error: {message}")]
    Input {
        /// Description of the offending input
        message: String,
    },

    /// Invalid strategy or parameter
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Operation requires a fitted preprocessor
    #[error("State error: {message}")]
    State {
        /// Description of the missing state
        message: String,
    },

    /// Transform input does not match the fitted schema
    #[error("Schema error: {message}")]
    Schema {
        /// Description of the schema mismatch
        message: String,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Rejected value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        /// Underlying I/O error
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[error("CSV parsing error: {source}")]
    Csv {
        /// Underlying CSV error
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// TOML serialization errors
    #[error("TOML error: {source}")]
    TomlSer {
        /// Underlying TOML error
        #[from]
        source: toml::ser::Error,
    },
}

/// Type alias for Results using TabprepError
pub type Result<T> = std::result::Result<T, TabprepError>;

impl TabprepError {
    /// Create an input error
    pub fn input<S: Into<String>>(message: S) -> Self {
        TabprepError::Input {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        TabprepError::Config {
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state<S: Into<String>>(message: S) -> Self {
        TabprepError::State {
            message: message.into(),
        }
    }

    /// Create a schema error
    pub fn schema<S: Into<String>>(message: S) -> Self {
        TabprepError::Schema {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        TabprepError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Error raised when an operation needs `fit` to have run first
    pub fn not_fitted(operation: &str) -> Self {
        TabprepError::state(format!(
            "{} called before fit; call fit() on a training partition first",
            operation
        ))
    }

    /// Whether this error belongs to the configuration category.
    ///
    /// Invalid parameter values are configuration errors too.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TabprepError::Config { .. } | TabprepError::InvalidParameter { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            TabprepError::Input { .. } => "input",
            TabprepError::Config { .. } => "config",
            TabprepError::State { .. } => "state",
            TabprepError::Schema { .. } => "schema",
            TabprepError::InvalidParameter { .. } => "config",
            TabprepError::IO { .. } => "io",
            TabprepError::Csv { .. } => "csv",
            TabprepError::Json { .. } => "json",
            TabprepError::TomlSer { .. } => "toml",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::TabprepError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::TabprepError::config(format!($fmt, $($arg)*))
    };
}

/// Build a [`TabprepError::Input`] from a message or format string.
#[macro_export]
macro_rules! input_error {
    ($msg:expr) => {
        $crate::core::error::TabprepError::input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::TabprepError::input(format!($fmt, $($arg)*))
    };
}

/// Build a [`TabprepError::Schema`] from a message or format string.
#[macro_export]
macro_rules! schema_error {
    ($msg:expr) => {
        $crate::core::error::TabprepError::schema($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::TabprepError::schema(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TabprepError::config("unsupported strategy");
        assert_eq!(err.category(), "config");
        assert!(err.is_config());

        let err = TabprepError::state("not fitted");
        assert_eq!(err.category(), "state");
        assert!(!err.is_config());
    }

    #[test]
    fn test_error_macros() {
        let err = config_error!("test error");
        assert!(matches!(err, TabprepError::Config { .. }));

        let err = input_error!("rows: {} vs {}", 3, 4);
        assert!(matches!(err, TabprepError::Input { .. }));
        assert!(err.to_string().contains("rows: 3 vs 4"));

        let err = schema_error!("missing column '{}'", "Age");
        assert!(matches!(err, TabprepError::Schema { .. }));
    }

    #[test]
    fn test_parameter_errors() {
        let err = TabprepError::invalid_parameter("test_fraction", "1.5", "must be in (0, 1)");
        assert_eq!(err.category(), "config");
        assert!(err.is_config());
        assert!(err.to_string().contains("test_fraction = 1.5"));
    }

    #[test]
    fn test_not_fitted_message() {
        let err = TabprepError::not_fitted("transform");
        assert!(matches!(err, TabprepError::State { .. }));
        assert!(err.to_string().contains("transform called before fit"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TabprepError = io_err.into();
        assert!(matches!(err, TabprepError::IO { .. }));
        assert_eq!(err.category(), "io");
    }
}
