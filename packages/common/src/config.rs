use crate::{CommonError, CommonResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "livepad.config.json";

/// Livepad configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Interface the preview server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the preview server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Remote generation endpoint. When unset the built-in stub is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_endpoint: Option<String>,

    /// Artificial latency of the stub generator, in milliseconds
    #[serde(default = "default_stub_delay_ms")]
    pub stub_delay_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_stub_delay_ms() -> u64 {
    300
}

impl Config {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(cwd: impl AsRef<Path>) -> CommonResult<Self> {
        let config_path = Self::path_in(cwd);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|source| CommonError::InvalidConfig {
            path: config_path.display().to_string(),
            source,
        })
    }

    /// Location of the config file inside `cwd`
    pub fn path_in(cwd: impl AsRef<Path>) -> PathBuf {
        cwd.as_ref().join(DEFAULT_CONFIG_NAME)
    }

    pub fn stub_delay(&self) -> Duration {
        Duration::from_millis(self.stub_delay_ms)
    }

    /// `host:port` pair for binding the server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            generate_endpoint: None,
            stub_delay_ms: default_stub_delay_ms(),
        }
    }
}
