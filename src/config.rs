use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Fixed route for liveness probes.
pub const HEALTH_PATH: &str = "/healthz";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub xkcd: XkcdConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Route the chat platform posts events to
    #[serde(default = "default_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct XkcdConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Applies to every outbound request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

fn default_base_url() -> String {
    "https://xkcd.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            path: default_path(),
        }
    }
}

impl Default for XkcdConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;

        if config.xkcd.timeout_secs == 0 {
            anyhow::bail!("xkcd.timeout_secs must be greater than zero");
        }
        if !config.server.path.starts_with('/') {
            anyhow::bail!("server.path must start with '/': {}", config.server.path);
        }
        // The path is mounted as a literal route; captures and wildcards are not allowed
        if config.server.path.contains([':', '*', '{', '}']) {
            anyhow::bail!(
                "server.path must be a literal path without ':', '*', '{{' or '}}': {}",
                config.server.path
            );
        }
        if config.server.path == HEALTH_PATH {
            anyhow::bail!("server.path must not be {}", HEALTH_PATH);
        }

        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}
