//! Observability for hospdb
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Session counters
//! - Lifecycle events and per-operation scopes
//!
//! Observability is read-only: a failed log write never affects the session.
//!
//! # Usage
//!
//! ```ignore
//! use hospdb::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_threshold(Severity::Info);
//! log_event_with_fields(Event::Connected, &[("host", "localhost")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, SessionMetrics};
pub use scope::ObservationScope;

#[cfg(test)]
pub(crate) use logger::recorder;

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
