use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::info;

pub const API_BASE_KEY: &str = "TSFOOD_API_BASE";
pub const PAGE_LIMIT_KEY: &str = "TSFOOD_PAGE_LIMIT";
pub const REVIEW_LIMIT_KEY: &str = "TSFOOD_REVIEW_LIMIT";
pub const TIMEOUT_KEY: &str = "TSFOOD_TIMEOUT_SECS";
pub const LOG_FILE_KEY: &str = "TSFOOD_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is missing. Set it to the storefront API base URL")]
    Missing(&'static str),
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub page_limit: u32,
    pub review_limit: u32,
    pub timeout_secs: u64,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            page_limit: 20,
            review_limit: 5,
            timeout_secs: 10,
            log_file: PathBuf::from("tsfood.log"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let api_base = lookup(API_BASE_KEY)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(API_BASE_KEY))?;

        Ok(Self {
            api_base,
            page_limit: try_load(&lookup, PAGE_LIMIT_KEY, defaults.page_limit)?,
            review_limit: try_load(&lookup, REVIEW_LIMIT_KEY, defaults.review_limit)?,
            timeout_secs: try_load(&lookup, TIMEOUT_KEY, defaults.timeout_secs)?,
            log_file: lookup(LOG_FILE_KEY).map(PathBuf::from).unwrap_or(defaults.log_file),
        })
    }

    pub fn log_summary(&self) {
        info!(
            api_base = %self.api_base,
            page_limit = self.page_limit,
            review_limit = self.review_limit,
            timeout_secs = self.timeout_secs,
            "Configuration loaded"
        );
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
    }
}
