//! Connection configuration
//!
//! Everything needed to open the single session against PostgreSQL.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

/// Connection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server host (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    pub port: u16,

    /// Database name
    pub dbname: String,

    /// Role to connect as
    pub user: String,

    /// Password, empty for trust/peer authentication
    #[serde(default)]
    pub password: String,

    /// Reported in `pg_stat_activity` (default: "hospdb")
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Seconds to wait for the server before giving up (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

pub(crate) fn default_host() -> String {
    "localhost".to_string()
}

pub(crate) fn default_application_name() -> String {
    "hospdb".to_string()
}

pub(crate) fn default_connect_timeout_secs() -> u64 {
    10
}

impl ConnectionConfig {
    /// Config for `dbname` on `localhost:port` as `user`, other fields defaulted
    pub fn new(dbname: impl Into<String>, port: u16, user: impl Into<String>) -> Self {
        Self {
            host: default_host(),
            port,
            dbname: dbname.into(),
            user: user.into(),
            password: String::new(),
            application_name: default_application_name(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// Connection URL shown to the operator. Never includes the password.
    pub fn display_url(&self) -> String {
        format!("postgres://{}:{}/{}", self.host, self.port, self.dbname)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Driver options for this config
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.dbname)
            .application_name(&self.application_name);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}
