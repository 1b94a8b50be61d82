//! Workspace configuration.
//!
//! Values come from built-in defaults, then an optional YAML file, then
//! environment variables. Later sources override earlier ones.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cmx_audit::{DisplayLocale, HistoryRecorder, DEFAULT_ACTOR_LABEL};
use cmx_engine::DEFAULT_DUE_SOON_DAYS;

/// Settings for the store and the `cmx` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmxConfig {
    /// Directory holding `register.json` and `matrix.json`.
    pub data_dir: PathBuf,
    /// Actor label written into audit entries.
    pub actor_label: String,
    /// Locale for dates in audit text.
    pub locale: DisplayLocale,
    /// Look-ahead window for "due soon", in days.
    pub due_soon_days: i64,
}

impl Default for CmxConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            actor_label: DEFAULT_ACTOR_LABEL.to_string(),
            locale: DisplayLocale::default(),
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
        }
    }
}

impl CmxConfig {
    /// Load configuration: defaults, then `path` if given, then the
    /// environment.
    ///
    /// Variables:
    /// - `CMX_DATA_DIR` (default: `./data`)
    /// - `CMX_ACTOR` (default: `Administrator`)
    /// - `CMX_LOCALE`, `de` or `en` (default: `de`)
    /// - `CMX_DUE_SOON_DAYS` (default: 30)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        tracing::debug!(
            data_dir = %config.data_dir.display(),
            locale = config.locale.as_str(),
            due_soon_days = config.due_soon_days,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parse a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Parse YAML text. Missing keys keep their defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Apply `CMX_*` overrides from `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = lookup("CMX_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(actor) = lookup("CMX_ACTOR") {
            self.actor_label = actor;
        }
        if let Some(locale) = lookup("CMX_LOCALE") {
            self.locale = locale
                .parse()
                .map_err(|reason| ConfigError::invalid("CMX_LOCALE", &locale, reason))?;
        }
        if let Some(days) = lookup("CMX_DUE_SOON_DAYS") {
            self.due_soon_days = days.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::invalid("CMX_DUE_SOON_DAYS", &days, e.to_string())
            })?;
        }
        Ok(self)
    }

    /// Reject values no source should produce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actor_label.trim().is_empty() {
            return Err(ConfigError::invalid(
                "actor_label",
                &self.actor_label,
                "must not be blank",
            ));
        }
        if self.due_soon_days < 0 {
            return Err(ConfigError::invalid(
                "due_soon_days",
                &self.due_soon_days.to_string(),
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// History recorder acting as the configured actor.
    pub fn recorder(&self) -> HistoryRecorder {
        HistoryRecorder::new(self.actor_label.clone(), self.locale)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
