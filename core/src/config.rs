//! Runtime configuration for the ledger store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "GLOME_DB_PATH";

pub const DEFAULT_DB_PATH: &str = "./local.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub db_path: PathBuf,
    /// How long a write waits on another process's lock before failing.
    pub busy_timeout_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl LedgerConfig {
    /// Load from a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: LedgerConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Combine the sources in priority order:
    /// command-line path, then environment, then config file, then defaults.
    pub fn resolve(
        cli_db: Option<&str>,
        env_db: Option<String>,
        file: Option<LedgerConfig>,
    ) -> Self {
        let mut config = file.unwrap_or_default();
        if let Some(env_db) = env_db.filter(|v| !v.trim().is_empty()) {
            config.db_path = PathBuf::from(env_db);
        }
        if let Some(cli_db) = cli_db {
            config.db_path = PathBuf::from(cli_db);
        }
        config
    }

    /// `resolve` with the environment read from the current process.
    pub fn from_sources(cli_db: Option<&str>, config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = config_file.map(Self::load).transpose()?;
        Ok(Self::resolve(cli_db, std::env::var(DB_PATH_ENV).ok(), file))
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_db() {
        let config = LedgerConfig::resolve(None, None, None);
        assert_eq!(config.db_path, PathBuf::from("./local.db"));
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = LedgerConfig {
            db_path: PathBuf::from("/from/file.db"),
            busy_timeout_ms: 250,
        };

        let config = LedgerConfig::resolve(None, None, Some(file.clone()));
        assert_eq!(config.db_path, PathBuf::from("/from/file.db"));
        assert_eq!(config.busy_timeout_ms, 250);

        let config = LedgerConfig::resolve(None, Some("/from/env.db".into()), Some(file.clone()));
        assert_eq!(config.db_path, PathBuf::from("/from/env.db"));
        assert_eq!(config.busy_timeout_ms, 250);

        let config = LedgerConfig::resolve(
            Some("/from/cli.db"),
            Some("/from/env.db".into()),
            Some(file),
        );
        assert_eq!(config.db_path, PathBuf::from("/from/cli.db"));
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let config = LedgerConfig::resolve(None, Some("  ".into()), None);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: LedgerConfig = serde_json::from_str(r#"{"db_path":"data/ledger.db"}"#).unwrap();
        assert_eq!(config.db_path, PathBuf::from("data/ledger.db"));
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = LedgerConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
