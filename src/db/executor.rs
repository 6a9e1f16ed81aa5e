//! The statement execution seam
//!
//! Domain operations only see `SqlExecutor`. The live session implements it
//! over sqlx; tests implement it with scripted responses.

use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event, Logger, SessionMetrics, Severity};

use super::errors::{DbError, DbResult};
use super::result::ResultSet;
use super::statement::Statement;

/// Runs statements synchronously against one connection
pub trait SqlExecutor {
    /// Run a statement that returns no rows; yields the affected row count
    fn execute(&mut self, stmt: &Statement) -> DbResult<u64>;

    /// Run a query and collect all rows as text
    fn query(&mut self, stmt: &Statement) -> DbResult<ResultSet>;

    /// Whether the query returns at least one row
    fn exists(&mut self, stmt: &Statement) -> DbResult<bool> {
        Ok(!self.query(stmt)?.is_empty())
    }
}

impl<E: SqlExecutor + ?Sized> SqlExecutor for &mut E {
    fn execute(&mut self, stmt: &Statement) -> DbResult<u64> {
        (**self).execute(stmt)
    }

    fn query(&mut self, stmt: &Statement) -> DbResult<ResultSet> {
        (**self).query(stmt)
    }
}

/// Wraps an executor with statement logging and session counters
pub struct InstrumentedExecutor<E> {
    inner: E,
    metrics: Arc<SessionMetrics>,
    session_id: String,
}

impl<E: SqlExecutor> InstrumentedExecutor<E> {
    pub fn new(inner: E, metrics: Arc<SessionMetrics>, session_id: impl Into<String>) -> Self {
        Self {
            inner,
            metrics,
            session_id: session_id.into(),
        }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }

    fn record_failure(&self, stmt: &Statement, err: &DbError) {
        self.metrics.increment_failures();
        let reason = err.to_string();
        let sql = stmt.sql_text();
        Logger::log(
            failure_severity(err),
            Event::StatementFailed.as_str(),
            &[
                ("code", err.code()),
                ("reason", reason.as_str()),
                ("session", self.session_id.as_str()),
                ("sql", sql.as_str()),
            ],
        );
    }
}

/// Rejected statements are routine at the console; a lost session is not
fn failure_severity(err: &DbError) -> Severity {
    if err.is_fatal() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

impl<E: SqlExecutor> SqlExecutor for InstrumentedExecutor<E> {
    fn execute(&mut self, stmt: &Statement) -> DbResult<u64> {
        match self.inner.execute(stmt) {
            Ok(affected) => {
                self.metrics.increment_statements();
                Logger::trace(
                    Event::StatementExecuted.as_str(),
                    &[
                        ("affected", affected.to_string().as_str()),
                        ("session", self.session_id.as_str()),
                        ("sql", stmt.describe().as_str()),
                    ],
                );
                Ok(affected)
            }
            Err(e) => {
                self.record_failure(stmt, &e);
                Err(e)
            }
        }
    }

    fn query(&mut self, stmt: &Statement) -> DbResult<ResultSet> {
        match self.inner.query(stmt) {
            Ok(rows) => {
                self.metrics.record_query(rows.len() as u64);
                Logger::trace(
                    Event::StatementExecuted.as_str(),
                    &[
                        ("rows", rows.len().to_string().as_str()),
                        ("session", self.session_id.as_str()),
                        ("sql", stmt.describe().as_str()),
                    ],
                );
                Ok(rows)
            }
            Err(e) => {
                self.record_failure(stmt, &e);
                Err(e)
            }
        }
    }
}

/// Log the session counters once, at exit
pub fn log_summary(metrics: &SessionMetrics, session_id: &str) {
    let fields = metrics.snapshot().to_fields();
    let mut refs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    refs.push(("session", session_id));
    log_event_with_fields(Event::SessionSummary, &refs);
}
