//! Environment-driven configuration.

use std::path::PathBuf;

use autoparts_observability::LogFormat;
use thiserror::Error;

pub const SEED_FILE_VAR: &str = "AUTOPARTS_SEED_FILE";
pub const RECENT_LIMIT_VAR: &str = "AUTOPARTS_RECENT_LIMIT";
pub const LOG_FORMAT_VAR: &str = "AUTOPARTS_LOG_FORMAT";

/// Movements listed on the dashboard when not configured.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file with the initial parts; `None` starts from the demo data.
    pub seed_file: Option<PathBuf>,
    pub recent_limit: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from any variable source. Unset and blank variables
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = AppConfig::default();

        if let Some(path) = get(SEED_FILE_VAR) {
            config.seed_file = Some(PathBuf::from(path));
        }

        if let Some(raw) = get(RECENT_LIMIT_VAR) {
            config.recent_limit = raw.parse().map_err(|e| ConfigError::InvalidValue {
                var: RECENT_LIMIT_VAR,
                reason: format!("{raw:?}: {e}"),
            })?;
        }

        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse()
                .map_err(|reason| ConfigError::InvalidValue { var: LOG_FORMAT_VAR, reason })?;
        }

        Ok(config)
    }
}
