//! Configuration file and flag merging
//!
//! The JSON file is optional and every field has a default. Command-line
//! flags win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::db::{
    default_application_name, default_connect_timeout_secs, default_host, ConnectionConfig,
};
use crate::observability::{log_event_with_fields, Event, Severity};

use super::args::Cli;
use super::errors::{CliError, CliResult};

fn default_log_level() -> String {
    "warn".to_string()
}

/// Contents of the `--config` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_application_name")]
    pub application_name: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            password: String::new(),
            application_name: default_application_name(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl FileConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: FileConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(CliError::config_error(
                "connect_timeout_secs must be greater than 0",
            ));
        }
        self.log_level
            .parse::<Severity>()
            .map_err(CliError::config_error)?;
        Ok(())
    }
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub connection: ConnectionConfig,
    pub log_level: Severity,
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Merge the optional config file with the command line
    pub fn resolve(cli: &Cli) -> CliResult<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let host = cli.host.clone().unwrap_or(file.host);
        if host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        let level_text = cli.log_level.as_deref().unwrap_or(&file.log_level);
        let log_level = level_text
            .parse::<Severity>()
            .map_err(CliError::config_error)?;

        let connection = ConnectionConfig {
            host,
            port: cli.port,
            dbname: cli.dbname.clone(),
            user: cli.user.clone(),
            password: cli.password.clone().unwrap_or(file.password),
            application_name: file.application_name,
            connect_timeout_secs: file.connect_timeout_secs,
        };

        if let Some(path) = &cli.config {
            let path = path.display().to_string();
            log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
        }

        Ok(Self {
            connection,
            log_level,
            config_path: cli.config.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec!["hospdb", "hospital", "5432", "alice"];
        args.extend_from_slice(extra);
        <Cli as clap::Parser>::try_parse_from(args).unwrap()
    }

    fn write_config(value: serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::resolve(&cli(&[])).unwrap();
        assert_eq!(settings.connection.host, "localhost");
        assert_eq!(settings.connection.port, 5432);
        assert_eq!(settings.connection.dbname, "hospital");
        assert_eq!(settings.connection.user, "alice");
        assert_eq!(settings.connection.connect_timeout_secs, 10);
        assert_eq!(settings.log_level, Severity::Warn);
        assert!(settings.config_path.is_none());
    }

    #[test]
    fn test_file_values_apply() {
        let file = write_config(json!({
            "host": "db.internal",
            "application_name": "front-desk",
            "connect_timeout_secs": 3,
            "log_level": "info"
        }));
        let path = file.path().to_str().unwrap();

        let settings = Settings::resolve(&cli(&["--config", path])).unwrap();
        assert_eq!(settings.connection.host, "db.internal");
        assert_eq!(settings.connection.application_name, "front-desk");
        assert_eq!(settings.connection.connect_timeout_secs, 3);
        assert_eq!(settings.log_level, Severity::Info);
    }

    #[test]
    fn test_flags_override_file() {
        let file = write_config(json!({ "host": "db.internal", "log_level": "info" }));
        let path = file.path().to_str().unwrap();

        let settings = Settings::resolve(&cli(&[
            "--config",
            path,
            "--host",
            "replica.internal",
            "--log-level",
            "error",
        ]))
        .unwrap();
        assert_eq!(settings.connection.host, "replica.internal");
        assert_eq!(settings.log_level, Severity::Error);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let file = write_config(json!({ "connect_timeout_secs": 0 }));
        let err = FileConfig::load(file.path()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let file = write_config(json!({ "log_level": "loud" }));
        assert!(FileConfig::load(file.path()).is_err());

        let err = Settings::resolve(&cli(&["--log-level", "loud"])).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_empty_host_rejected() {
        let file = write_config(json!({ "host": "  " }));
        assert!(FileConfig::load(file.path()).is_err());
        assert!(Settings::resolve(&cli(&["--host", ""])).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_config(json!({ "hots": "typo" }));
        let err = FileConfig::load(file.path()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = FileConfig::load(Path::new("/nonexistent/hospdb.json")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert!(err.message().contains("/nonexistent/hospdb.json"));
    }
}
