//! Database access for hospdb
//!
//! - `ConnectionConfig`: where and as whom to connect
//! - `SqlExecutor`: the synchronous statement seam every operation goes through
//! - `PgSession`: the live sqlx-backed implementation
//! - `Statement` / `ResultSet`: parameterized SQL in, text rows out
//!
//! Query planning, transactions, pooling and schema management all belong to
//! the PostgreSQL server; this layer only ships statements to it.

mod config;
mod errors;
mod executor;
mod postgres;
mod result;
mod statement;

pub use config::ConnectionConfig;
pub(crate) use config::{default_application_name, default_connect_timeout_secs, default_host};
pub use errors::{DbError, DbResult};
pub use executor::{log_summary, InstrumentedExecutor, SqlExecutor};
pub use postgres::PgSession;
pub use result::ResultSet;
pub use statement::{begin, commit, rollback, SqlParam, Statement};
