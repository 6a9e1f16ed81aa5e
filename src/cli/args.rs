//! CLI argument definitions using clap
//!
//! ```text
//! hospdb <DBNAME> <PORT> <USER> [--host HOST] [--password PW] [--config PATH] [--log-level LEVEL]
//! ```

use clap::Parser;
use std::path::PathBuf;

/// hospdb - menu-driven client for the hospital appointment database
#[derive(Parser, Debug, Clone)]
#[command(name = "hospdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database name
    pub dbname: String,

    /// Server port
    pub port: u16,

    /// Role to connect as
    pub user: String,

    /// Server host; overrides the config file (default: localhost)
    #[arg(long)]
    pub host: Option<String>,

    /// Password; overrides the config file
    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum severity written to stderr: trace, info, warn, error, fatal
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["hospdb", "hospital", "5432", "alice"]).unwrap();
        assert_eq!(cli.dbname, "hospital");
        assert_eq!(cli.port, 5432);
        assert_eq!(cli.user, "alice");
        assert!(cli.host.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "hospdb",
            "hospital",
            "6543",
            "bob",
            "--host",
            "db.internal",
            "--config",
            "/etc/hospdb.json",
            "--log-level",
            "info",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("db.internal"));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/hospdb.json")));
        assert_eq!(cli.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["hospdb", "hospital", "port", "alice"]).is_err());
        assert!(Cli::try_parse_from(["hospdb", "hospital", "70000", "alice"]).is_err());
    }

    #[test]
    fn test_requires_all_positionals() {
        assert!(Cli::try_parse_from(["hospdb", "hospital", "5432"]).is_err());
    }
}
