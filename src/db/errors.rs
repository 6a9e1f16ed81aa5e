//! # Database Errors
//!
//! Error types for the connection and statement layer.

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Failures talking to the external database
#[derive(Debug, Error)]
pub enum DbError {
    /// The connection could not be established
    #[error("unable to connect: {0}")]
    Connect(String),

    /// The connection attempt exceeded the configured timeout
    #[error("connection timed out after {0}s")]
    ConnectTimeout(u64),

    /// The async runtime backing the session could not be built
    #[error("runtime error: {0}")]
    Runtime(String),

    /// The database rejected a statement
    #[error("{0}")]
    Statement(String),

    /// A value in a result row could not be decoded
    #[error("cannot decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    /// The session was already closed
    #[error("connection is closed")]
    Closed,
}

impl DbError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            DbError::Connect(_) => "HOSP_DB_CONNECT_FAILED",
            DbError::ConnectTimeout(_) => "HOSP_DB_CONNECT_TIMEOUT",
            DbError::Runtime(_) => "HOSP_DB_RUNTIME",
            DbError::Statement(_) => "HOSP_DB_STATEMENT_FAILED",
            DbError::Decode { .. } => "HOSP_DB_DECODE_FAILED",
            DbError::Closed => "HOSP_DB_CLOSED",
        }
    }

    /// Whether the error ends the session
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DbError::Connect(_) | DbError::ConnectTimeout(_) | DbError::Runtime(_) | DbError::Closed
        )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) => DbError::Statement(db.message().to_string()),
            sqlx::Error::ColumnDecode { index, source } => DbError::Decode {
                column: index,
                reason: source.to_string(),
            },
            // the socket is gone; nothing further can be sent
            lost @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::WorkerCrashed) => DbError::Connect(lost.to_string()),
            other => DbError::Statement(other.to_string()),
        }
    }
}
