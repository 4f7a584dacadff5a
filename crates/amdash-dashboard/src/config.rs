/*
[INPUT]:  Built-in defaults, optional YAML file, AMDASH_* environment
[OUTPUT]: Parsed dashboard configuration
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use amdash_adapter::{ClientConfig, DEFAULT_BASE_URL};
use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::progress::MissingPredecessor;

const APP_DIR: &str = "amdash";
const ENV_PREFIX: &str = "AMDASH";

/// Top-level configuration for the dashboard client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend base URL
    pub api_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Where the session file lives
    pub data_dir: PathBuf,
    /// Also write logs here when set
    pub log_file: Option<PathBuf>,
    /// Leaderboard watch interval
    pub leaderboard_refresh_secs: u64,
    /// Unlock policy for a task whose predecessor is missing
    pub missing_predecessor: MissingPredecessor,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            data_dir: default_data_dir(),
            log_file: None,
            leaderboard_refresh_secs: 10,
            missing_predecessor: MissingPredecessor::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

impl DashboardConfig {
    /// Load configuration from a YAML file alone
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.normalized()
    }

    /// `<config_dir>/amdash/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
    }

    /// Defaults, then the YAML file, then `AMDASH_*` variables.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder
                        .add_source(File::from(default).format(FileFormat::Yaml).required(false));
                }
            }
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Self = builder
            .build()
            .context("read configuration")?
            .try_deserialize()
            .context("parse configuration")?;
        config.normalized()
    }

    fn normalized(mut self) -> Result<Self> {
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            bail!("api_url must not be empty");
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            bail!("timeouts must be at least one second");
        }
        if self.leaderboard_refresh_secs == 0 {
            bail!("leaderboard_refresh_secs must be at least one second");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn leaderboard_refresh(&self) -> Duration {
        Duration::from_secs(self.leaderboard_refresh_secs)
    }
}
