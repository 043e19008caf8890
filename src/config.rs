//! TOML configuration with environment overrides.
//!
//! Every section is optional. A missing file yields [`Config::default`];
//! the `PORT` environment variable overrides `[server].port`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that selects the listen port.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./db/readaloud.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    /// `host:port`, resolved when the listener binds.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout. Unset means the fetch may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
            system_proxy: default_system_proxy(),
        }
    }
}

fn default_system_proxy() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("readaloud/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RenderConfig {
    /// Directory holding `index.html`, `text-reader.html` and `error.html`.
    /// Built-in templates are used when unset.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// Loads the config file, falling back to defaults when it does not exist,
/// then applies environment overrides and validates.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        parse_config(&content)?
    } else {
        Config::default()
    };

    if let Ok(port) = std::env::var(PORT_ENV) {
        apply_port_override(&mut config, &port)?;
    }

    validate(&config)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).with_context(|| "Failed to parse config file")
}

fn apply_port_override(config: &mut Config, value: &str) -> Result<()> {
    config.server.port = value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a port number, got '{}'", PORT_ENV, value))?;
    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("server.port must be > 0");
    }

    if config.fetch.timeout_secs == Some(0) {
        anyhow::bail!("fetch.timeout_secs must be > 0 when set");
    }

    if config.db.path.as_os_str().is_empty() {
        anyhow::bail!("db.path must not be empty");
    }

    Ok(())
}
