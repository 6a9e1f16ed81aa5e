//! Session counters
//!
//! - Counters only, monotonic
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one interactive session
#[derive(Debug, Default)]
pub struct SessionMetrics {
    /// INSERT / UPDATE / transaction control statements that succeeded
    statements_executed: AtomicU64,
    /// SELECT queries that succeeded
    queries_executed: AtomicU64,
    /// Rows returned across all queries
    rows_returned: AtomicU64,
    /// Statements or queries the database rejected
    statement_failures: AtomicU64,
    /// Menu operations started
    operations_run: AtomicU64,
    /// Bookings committed
    bookings_committed: AtomicU64,
}

impl SessionMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_statements(&self) {
        self.statements_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query(&self, rows: u64) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.rows_returned.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_failures(&self) {
        self.statement_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_operations(&self) {
        self.operations_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_bookings(&self) {
        self.bookings_committed.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            statements_executed: self.statements_executed.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            statement_failures: self.statement_failures.load(Ordering::Relaxed),
            operations_run: self.operations_run.load(Ordering::Relaxed),
            bookings_committed: self.bookings_committed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub statements_executed: u64,
    pub queries_executed: u64,
    pub rows_returned: u64,
    pub statement_failures: u64,
    pub operations_run: u64,
    pub bookings_committed: u64,
}

impl MetricsSnapshot {
    /// Counters as `(key, value)` pairs for the logger
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bookings_committed", self.bookings_committed.to_string()),
            ("operations_run", self.operations_run.to_string()),
            ("queries_executed", self.queries_executed.to_string()),
            ("rows_returned", self.rows_returned.to_string()),
            ("statement_failures", self.statement_failures.to_string()),
            ("statements_executed", self.statements_executed.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let metrics = SessionMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_record_query_accumulates_rows() {
        let metrics = SessionMetrics::new();

        metrics.record_query(3);
        metrics.record_query(0);
        metrics.record_query(4);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries_executed, 3);
        assert_eq!(snapshot.rows_returned, 7);
    }

    #[test]
    fn test_increment_counters() {
        let metrics = SessionMetrics::new();

        metrics.increment_statements();
        metrics.increment_statements();
        metrics.increment_failures();
        metrics.increment_operations();
        metrics.increment_bookings();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.statements_executed, 2);
        assert_eq!(snapshot.statement_failures, 1);
        assert_eq!(snapshot.operations_run, 1);
        assert_eq!(snapshot.bookings_committed, 1);
    }

    #[test]
    fn test_fields_cover_every_counter() {
        let metrics = SessionMetrics::new();
        metrics.record_query(2);

        let fields = metrics.snapshot().to_fields();
        assert_eq!(fields.len(), 6);
        assert!(fields.contains(&("rows_returned", "2".to_string())));
    }
}
