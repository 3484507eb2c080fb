use oasis_memory::{Limits, DEFAULT_CHAT_LIMIT, DEFAULT_LOG_LIMIT, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_EXPORT_FILE: &str = "agent-ui-export.json";
pub const STORAGE_KEY_ENV: &str = "OASIS_STORAGE_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub storage_key: String,
    pub export_file: String,
    /// Time between starting a task and resolving it.
    pub execution_delay_ms: u64,
    /// Pause before auto-run picks up the next task.
    pub auto_run_delay_ms: u64,
    pub chat_limit: usize,
    pub log_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_file: DEFAULT_EXPORT_FILE.to_string(),
            execution_delay_ms: 450,
            auto_run_delay_ms: 350,
            chat_limit: DEFAULT_CHAT_LIMIT,
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl AppConfig {
    /// Reads a YAML config file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(STORAGE_KEY_ENV) {
            if !key.trim().is_empty() {
                self.storage_key = key.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key is empty".to_string()));
        }
        if self
            .storage_key
            .contains(|c: char| c == '/' || c == '\\' || c == '.')
        {
            return Err(ConfigError::Invalid(format!(
                "storage_key must be a plain name: {}",
                self.storage_key
            )));
        }
        if self.export_file.trim().is_empty() {
            return Err(ConfigError::Invalid("export_file is empty".to_string()));
        }
        if self.chat_limit == 0 || self.log_limit == 0 {
            return Err(ConfigError::Invalid(
                "chat_limit and log_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            chat: self.chat_limit,
            logs: self.log_limit,
        }
    }

    pub fn execution_delay(&self) -> Duration {
        Duration::from_millis(self.execution_delay_ms)
    }

    pub fn auto_run_delay(&self) -> Duration {
        Duration::from_millis(self.auto_run_delay_ms)
    }
}
