//! Configuration for the fleetmon CLI.
//!
//! TOML file + environment overlay, credential resolution (env var,
//! then plaintext), and translation to `fleetmon_core::SyncConfig`.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fleetmon_core::SyncConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured; set remote.api_key, remote.api_key_env, or FLEETMON_API_KEY")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    /// Pipeline service connection. Absent until `fleetmon config set`
    /// (or hand-editing) fills it in; sync commands require it.
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format: "table", "json", or "plain".
    #[serde(default = "default_output")]
    pub output: String,

    /// Directory holding devices.json and settings.json. Defaults to
    /// the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            data_dir: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}

/// Pipeline service connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub https: bool,

    /// API key (plaintext; prefer api_key_env).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,
}

fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "fleetmon", "fleetmon")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the data directory holding devices.json and settings.json.
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.defaults.data_dir {
        return dir.clone();
    }
    project_dirs().map_or_else(
        || home_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn home_fallback(subdir: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(subdir);
    p.push("fleetmon");
    p
}

// ── Loading and saving ──────────────────────────────────────────────

/// Load the config from file + environment (`FLEETMON_` prefix).
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path; the environment overlay still applies.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FLEETMON_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults when the file is missing or
/// broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key: named env var, then `FLEETMON_API_KEY`, then
/// plaintext in the config file.
pub fn resolve_api_key(remote: &RemoteConfig) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = remote.api_key_env
        && let Ok(val) = std::env::var(env_name)
    {
        return Ok(SecretString::from(val));
    }

    if let Ok(val) = std::env::var("FLEETMON_API_KEY") {
        return Ok(SecretString::from(val));
    }

    if let Some(ref key) = remote.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials)
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `SyncConfig` from the remote section.
pub fn to_sync_config(remote: &RemoteConfig) -> Result<SyncConfig, ConfigError> {
    if remote.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "remote.host".into(),
            reason: "must not be empty".into(),
        });
    }

    Ok(SyncConfig {
        host: remote.host.clone(),
        port: remote.port,
        api_key: resolve_api_key(remote)?,
        timeout_secs: remote.timeout,
        use_https: remote.https,
        insecure: remote.insecure,
    })
}
