//! CLI-specific error types
//!
//! Every `CliError` ends the process; `main` prints it and exits 1.

use std::fmt;
use std::io;

use crate::db::DbError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or flag error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Database unreachable or connection lost
    ConnectFailed,
    /// Standard input reached end of file
    InputClosed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "HOSP_CLI_CONFIG_ERROR",
            Self::IoError => "HOSP_CLI_IO_ERROR",
            Self::ConnectFailed => "HOSP_CLI_CONNECT_FAILED",
            Self::InputClosed => "HOSP_CLI_INPUT_CLOSED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn connect_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConnectFailed, msg)
    }

    pub fn input_closed() -> Self {
        Self::new(CliErrorCode::InputClosed, "Standard input closed")
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_input_closed(&self) -> bool {
        self.code == CliErrorCode::InputClosed
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::config_error(format!("JSON error: {}", e))
    }
}

/// Only fatal database errors escape a menu operation
impl From<DbError> for CliError {
    fn from(e: DbError) -> Self {
        Self::connect_failed(format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
