//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE`, `{name}_REJECTED` or `{name}_FAILED` when closed
//! - Logs `{name}_INCOMPLETE` on drop if never closed

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

#[cfg(test)]
use super::logger::recorder;

/// A scope that logs the start and outcome of one menu operation
///
/// ```ignore
/// let scope = ObservationScope::with_fields("ADD_DOCTOR", &[("session", id)]);
/// // ... prompt, insert ...
/// scope.complete(); // logs ADD_DOCTOR_COMPLETE with elapsed_ms
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    started: Instant,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope with fields repeated on every line
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        let event = format!("{}_BEGIN", name);
        Logger::info(&event, fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
        }
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.completed.set(true);
        let event = format!("{}_COMPLETE", self.name);
        let elapsed = self.started.elapsed().as_millis().to_string();
        let mut fields = self.field_refs();
        fields.push(("elapsed_ms", elapsed.as_str()));
        Logger::info(&event, &fields);
    }

    /// Mark the scope as failed with a reason
    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        let event = format!("{}_FAILED", self.name);
        let mut fields = self.field_refs();
        fields.push(("reason", reason));
        Logger::error(&event, &fields);
    }

    /// Close the scope for an outcome the operator caused, such as a rejected
    /// input or a closed console. Logged at INFO.
    pub fn reject(self, reason: &str) {
        self.completed.set(true);
        let event = format!("{}_REJECTED", self.name);
        let mut fields = self.field_refs();
        fields.push(("reason", reason));
        Logger::info(&event, &fields);
    }

    /// Check if the scope has been closed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            let event = format!("{}_INCOMPLETE", self.name);
            Logger::warn(&event, &[("reason", "scope dropped without completion")]);
        }
    }
}
