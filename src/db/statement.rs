//! Parameterized SQL statements
//!
//! SQL text is always a fixed string from the statement catalogue; every
//! user-supplied value travels as a positional bind parameter.

use std::fmt;

use chrono::NaiveDate;

/// A value bound to a `$n` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
    Date(NaiveDate),
}

impl fmt::Display for SqlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlParam::Int(v) => write!(f, "{}", v),
            SqlParam::Text(v) => write!(f, "'{}'", v),
            SqlParam::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(v: NaiveDate) -> Self {
        SqlParam::Date(v)
    }
}

/// A SQL string plus its bind parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: &'static str,
    params: Vec<SqlParam>,
}

impl Statement {
    /// Statement without parameters
    pub fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    /// Append the next positional parameter
    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// SQL on one line, without parameter values
    pub fn sql_text(&self) -> String {
        self.sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// `sql_text` with the bound values appended. Values carry patient
    /// details, so this is only logged at TRACE.
    pub fn describe(&self) -> String {
        let sql = self.sql_text();
        if self.params.is_empty() {
            return sql;
        }
        let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        format!("{} -- [{}]", sql, params.join(", "))
    }
}

/// `BEGIN`
pub fn begin() -> Statement {
    Statement::new("BEGIN")
}

/// `COMMIT`
pub fn commit() -> Statement {
    Statement::new("COMMIT")
}

/// `ROLLBACK`
pub fn rollback() -> Statement {
    Statement::new("ROLLBACK")
}
