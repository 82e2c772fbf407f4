use crate::db::registry::MEMORY;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `:memory:` or a path to an SQLite file
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_connection_name")]
    pub connection_name: String,
    /// tracing filter directive, e.g. `info` or `account_session=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    MEMORY.to_string()
}
fn default_connection_name() -> String {
    "example".to_string()
}
fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            connection_name: default_connection_name(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or return defaults when no file is given.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(p) => {
                let content = fs::read_to_string(p)?;
                Self::from_yaml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        // an empty file is just "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
