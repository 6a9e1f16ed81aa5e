//! Live PostgreSQL session
//!
//! One sqlx connection driven by a private current-thread tokio runtime.
//! Every call blocks until the server answers, so callers stay synchronous.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::postgres::{PgArguments, PgConnection, PgRow, PgTypeInfo, PgTypeKind};
use sqlx::query::Query;
use sqlx::{Column, Connection, Postgres, Row, TypeInfo};
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

use super::config::ConnectionConfig;
use super::errors::{DbError, DbResult};
use super::executor::SqlExecutor;
use super::result::ResultSet;
use super::statement::{SqlParam, Statement};

/// A single synchronous connection
pub struct PgSession {
    runtime: Runtime,
    conn: Option<PgConnection>,
}

impl PgSession {
    /// Open the connection described by `config`
    pub fn connect(config: &ConnectionConfig) -> DbResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DbError::Runtime(e.to_string()))?;

        let options = config.connect_options();
        let timeout = config.connect_timeout();
        let conn = runtime.block_on(async {
            match tokio::time::timeout(timeout, PgConnection::connect_with(&options)).await {
                Ok(result) => result.map_err(|e| DbError::Connect(e.to_string())),
                Err(_) => Err(DbError::ConnectTimeout(config.connect_timeout_secs)),
            }
        })?;

        Ok(Self {
            runtime,
            conn: Some(conn),
        })
    }

    /// Send a graceful terminate and drop the connection. Idempotent.
    pub fn close(&mut self) -> DbResult<()> {
        if let Some(conn) = self.conn.take() {
            self.runtime.block_on(conn.close())?;
        }
        Ok(())
    }
}

impl SqlExecutor for PgSession {
    fn execute(&mut self, stmt: &Statement) -> DbResult<u64> {
        let conn = self.conn.as_mut().ok_or(DbError::Closed)?;
        let query = bind_params(stmt.sql(), stmt.params());
        let done = self.runtime.block_on(query.execute(conn))?;
        Ok(done.rows_affected())
    }

    fn query(&mut self, stmt: &Statement) -> DbResult<ResultSet> {
        let conn = self.conn.as_mut().ok_or(DbError::Closed)?;
        let query = bind_params(stmt.sql(), stmt.params());
        let rows = self.runtime.block_on(query.fetch_all(conn))?;

        let columns = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => Vec::new(),
        };

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut cells = Vec::with_capacity(columns.len());
            for index in 0..row.len() {
                cells.push(cell_text(row, index)?);
            }
            out.push(cells);
        }

        Ok(ResultSet::new(columns, out))
    }
}

impl Drop for PgSession {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn bind_params<'q>(sql: &'q str, params: &'q [SqlParam]) -> Query<'q, Postgres, PgArguments> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.as_str()),
            SqlParam::Date(v) => query.bind(*v),
        };
    }
    query
}

/// How a column of a given server type is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellDecoder {
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bool,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Uuid,
    /// TEXT, VARCHAR, BPCHAR, NAME
    Text,
    /// user-defined enums travel as their label
    EnumLabel,
    Unsupported,
}

impl CellDecoder {
    fn for_type(type_info: &PgTypeInfo) -> Self {
        let is_enum = matches!(type_info.kind(), PgTypeKind::Enum(_));
        Self::for_name(type_info.name(), is_enum)
    }

    fn for_name(type_name: &str, is_enum: bool) -> Self {
        match type_name {
            "INT2" => CellDecoder::Int2,
            "INT4" => CellDecoder::Int4,
            "INT8" => CellDecoder::Int8,
            "FLOAT4" => CellDecoder::Float4,
            "FLOAT8" => CellDecoder::Float8,
            "BOOL" => CellDecoder::Bool,
            "DATE" => CellDecoder::Date,
            "TIME" => CellDecoder::Time,
            "TIMESTAMP" => CellDecoder::Timestamp,
            "TIMESTAMPTZ" => CellDecoder::TimestampTz,
            "UUID" => CellDecoder::Uuid,
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "UNKNOWN" => CellDecoder::Text,
            _ if is_enum => CellDecoder::EnumLabel,
            _ => CellDecoder::Unsupported,
        }
    }
}

/// Render one cell as text, dispatching on the column's server type
fn cell_text(row: &PgRow, index: usize) -> DbResult<Option<String>> {
    let column = &row.columns()[index];
    let type_name = column.type_info().name();

    let text = match CellDecoder::for_type(column.type_info()) {
        CellDecoder::Int2 => row.try_get::<Option<i16>, _>(index)?.map(|v| v.to_string()),
        CellDecoder::Int4 => row.try_get::<Option<i32>, _>(index)?.map(|v| v.to_string()),
        CellDecoder::Int8 => row.try_get::<Option<i64>, _>(index)?.map(|v| v.to_string()),
        CellDecoder::Float4 => row.try_get::<Option<f32>, _>(index)?.map(|v| v.to_string()),
        CellDecoder::Float8 => row.try_get::<Option<f64>, _>(index)?.map(|v| v.to_string()),
        CellDecoder::Bool => row
            .try_get::<Option<bool>, _>(index)?
            .map(|v| String::from(if v { "t" } else { "f" })),
        CellDecoder::Date => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map(|v| v.format("%Y-%m-%d").to_string()),
        CellDecoder::Time => row
            .try_get::<Option<NaiveTime>, _>(index)?
            .map(|v| v.format("%H:%M:%S").to_string()),
        CellDecoder::Timestamp => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|v| v.format("%Y-%m-%d %H:%M:%S").to_string()),
        CellDecoder::TimestampTz => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|v| v.format("%Y-%m-%d %H:%M:%S%:z").to_string()),
        CellDecoder::Uuid => row.try_get::<Option<Uuid>, _>(index)?.map(|v| v.to_string()),
        CellDecoder::Text => row.try_get::<Option<String>, _>(index)?,
        // enum labels are sent as raw text in the binary format
        CellDecoder::EnumLabel => row.try_get_unchecked::<Option<String>, _>(index)?,
        CellDecoder::Unsupported => {
            return Err(DbError::Decode {
                column: column.name().to_string(),
                reason: format!("unsupported column type {}", type_name),
            })
        }
    };

    Ok(text.map(|s| {
        if type_name == "BPCHAR" {
            s.trim_end().to_string()
        } else {
            s
        }
    }))
}
