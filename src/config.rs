//! Layered runtime settings.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `QUIZDASH_*` environment variables. CLI flags are applied on top by
//! the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;

/// Default backend location.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Default history refresh interval.
pub const DEFAULT_POLL_INTERVAL: &str = "30s";
/// Default export file name.
pub const DEFAULT_EXPORT_PATH: &str = "quiz_history_export.json";

#[derive(Debug, Clone, Deserialize)]
struct RawSettings {
    backend_url: String,
    poll_interval: String,
    export_path: PathBuf,
    log_file: Option<PathBuf>,
}

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend_url: String,
    pub poll_interval: Duration,
    /// Where the in-app export writes.
    pub export_path: PathBuf,
    /// Log file for TUI mode; `None` means the default location.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            poll_interval: Duration::from_secs(30),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_path, Environment::with_prefix("QUIZDASH"))
    }

    fn load_with_env(config_path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("poll_interval", DEFAULT_POLL_INTERVAL)?
            .set_default("export_path", DEFAULT_EXPORT_PATH)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let raw: RawSettings = builder
            .add_source(env)
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(Self {
            backend_url: raw.backend_url,
            poll_interval: parse_poll_interval(&raw.poll_interval)?,
            export_path: raw.export_path,
            log_file: raw.log_file,
        })
    }

    /// Default log file location for TUI mode.
    pub fn log_file_or_default(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| std::env::temp_dir().join("quizdash.log"))
    }
}

/// Parse a poll interval, rejecting zero.
pub fn parse_poll_interval(s: &str) -> Result<Duration> {
    let interval = parse_duration(s).with_context(|| format!("Invalid poll interval '{}'", s))?;
    if interval.is_zero() {
        bail!("Poll interval must be greater than zero");
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env() -> Environment {
        Environment::with_prefix("QUIZDASH").source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, no_env()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "backend_url = \"http://quiz.internal:9000\"").unwrap();
        writeln!(file, "poll_interval = \"5s\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(settings.backend_url, "http://quiz.internal:9000");
        assert_eq!(settings.poll_interval, Duration::from_secs(5));
        assert_eq!(settings.export_path, PathBuf::from(DEFAULT_EXPORT_PATH));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "backend_url = \"http://from-file:1\"").unwrap();
        file.flush().unwrap();

        let env = Environment::with_prefix("QUIZDASH").source(Some(HashMap::from([(
            "QUIZDASH_BACKEND_URL".to_string(),
            "http://from-env:2".to_string(),
        )])));

        let settings = Settings::load_with_env(Some(file.path()), env).unwrap();
        assert_eq!(settings.backend_url, "http://from-env:2");
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(parse_poll_interval("0s").is_err());
        assert!(parse_poll_interval("later").is_err());
        assert_eq!(parse_poll_interval("1m").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn test_missing_file_is_error() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("missing.toml");
        assert!(Settings::load_with_env(Some(&path), no_env()).is_err());
    }
}
