//! Settings of the `smeta` binary.
//!
//! Values come from an optional TOML file (`config/smeta.toml` unless
//! `--config` says otherwise) overridden by `SMETA__<SECTION>__<KEY>`
//! environment variables. Every key has a default.
use std::path::PathBuf;
use std::time::Duration;

use engine::Rates;
use serde::Deserialize;
use worker::RetryPolicy;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/smeta.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level for the workspace crates.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Retry {
    pub max_attempts: u32,
    pub delay_secs: u64,
    pub time_limit_secs: u64,
}

impl Default for Retry {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            delay_secs: policy.delay.as_secs(),
            time_limit_secs: policy.time_limit.as_secs(),
        }
    }
}

impl From<&Retry> for RetryPolicy {
    fn from(value: &Retry) -> Self {
        Self {
            max_attempts: value.max_attempts,
            delay: Duration::from_secs(value.delay_secs),
            time_limit: Duration::from_secs(value.time_limit_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Directory the artifacts are written under.
    pub root: PathBuf,
    /// Prefix of the returned locators.
    pub base_url: String,
    pub category: String,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            root: PathBuf::from("media"),
            base_url: "/media/".to_string(),
            category: worker::DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Directory holding one `<id>.json` file per estimate.
    pub dir: PathBuf,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/smetalar"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub rates: Rates,
    pub retry: Retry,
    pub storage: Storage,
    pub source: Source,
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SMETA").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from(&self.retry)
    }
}
