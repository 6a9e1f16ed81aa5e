//! Observable events for a hospdb session
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in hospdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Session lifecycle
    /// Process started, arguments parsed
    SessionStart,
    /// Menu loop left, about to disconnect
    SessionEnd,
    /// Counters logged at exit
    SessionSummary,

    // Configuration
    /// Configuration file loaded and merged
    ConfigLoaded,

    // Connection
    /// Connection attempt begins
    ConnectBegin,
    /// Connection established
    Connected,
    /// Connection could not be established (FATAL)
    ConnectFailed,
    /// Connection closed
    Disconnected,

    // Statements
    /// Statement or query completed
    StatementExecuted,
    /// Statement rejected by the database
    StatementFailed,

    // Booking workflow
    /// Booking writes committed
    BookingCommitted,
    /// Booking writes rolled back
    BookingRolledBack,

    // Console
    /// Standard input closed while a prompt was pending
    InputClosed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SessionStart => "HOSPDB_SESSION_BEGIN",
            Event::SessionEnd => "HOSPDB_SESSION_END",
            Event::SessionSummary => "SESSION_SUMMARY",

            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::ConnectBegin => "CONNECT_BEGIN",
            Event::Connected => "CONNECT_COMPLETE",
            Event::ConnectFailed => "CONNECT_FAILED",
            Event::Disconnected => "DISCONNECTED",

            Event::StatementExecuted => "STATEMENT_EXECUTED",
            Event::StatementFailed => "STATEMENT_FAILED",

            Event::BookingCommitted => "BOOKING_COMMITTED",
            Event::BookingRolledBack => "BOOKING_ROLLED_BACK",

            Event::InputClosed => "INPUT_CLOSED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ConnectFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
