//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is normal and never fatal. A config file that exists
//! but cannot be parsed is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::storage::{StorageConfig, DEFAULT_BUCKET};
use crate::{Error, Result};

pub const ENV_DATABASE: &str = "LWAI_DATABASE";
pub const ENV_BIND: &str = "LWAI_BIND";
pub const ENV_PORT: &str = "LWAI_PORT";
pub const ENV_STORAGE_URL: &str = "LWAI_STORAGE_URL";
pub const ENV_STORAGE_BUCKET: &str = "LWAI_STORAGE_BUCKET";
pub const ENV_ADMIN_PASSWORD: &str = "LWAI_ADMIN_PASSWORD";
pub const ENV_READ_TIMEOUT_MS: &str = "LWAI_SECTION_READ_TIMEOUT_MS";

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_STORAGE_URL: &str = "http://127.0.0.1:54321";

/// Contents of `config.toml`; every key optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub storage_url: Option<String>,
    pub storage_bucket: Option<String>,
    pub admin_password: Option<String>,
    pub section_read_timeout_ms: Option<u64>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub storage_url: Option<String>,
    pub storage_bucket: Option<String>,
    pub admin_password: Option<String>,
    pub section_read_timeout_ms: Option<u64>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub storage: StorageConfig,
    /// `None` disables admin login
    pub admin_password: Option<String>,
    /// Per-section read bound for the content aggregator; `None` = unbounded
    pub section_read_timeout_ms: Option<u64>,
}

impl SiteConfig {
    /// Resolve from CLI overrides, the process environment and a config file
    pub fn resolve(cli: CliOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let database_path = cli
            .database_path
            .or_else(|| env_string(ENV_DATABASE).map(PathBuf::from))
            .or(file.database_path)
            .unwrap_or_else(default_database_path);

        let bind_address = cli
            .bind_address
            .or_else(|| env_string(ENV_BIND))
            .or(file.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => match env_parsed::<u16>(ENV_PORT)? {
                Some(port) => port,
                None => file.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let storage_url = cli
            .storage_url
            .or_else(|| env_string(ENV_STORAGE_URL))
            .or(file.storage_url)
            .unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string());

        let storage_bucket = cli
            .storage_bucket
            .or_else(|| env_string(ENV_STORAGE_BUCKET))
            .or(file.storage_bucket)
            .unwrap_or_else(|| DEFAULT_BUCKET.to_string());

        let admin_password = cli
            .admin_password
            .or_else(|| env_string(ENV_ADMIN_PASSWORD))
            .or(file.admin_password)
            .filter(|p| !p.is_empty());

        let section_read_timeout_ms = match cli.section_read_timeout_ms {
            Some(ms) => Some(ms),
            None => env_parsed::<u64>(ENV_READ_TIMEOUT_MS)?.or(file.section_read_timeout_ms),
        };

        Ok(Self {
            database_path,
            bind_address,
            port,
            storage: StorageConfig::new(&storage_url, &storage_bucket),
            admin_password,
            section_read_timeout_ms,
        })
    }

    /// `host:port` for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has invalid value: {}", name, raw))),
        None => Ok(None),
    }
}

/// Load the TOML config file
///
/// With an explicit path the file must exist. Without one the platform
/// locations are tried and absence yields `Ok(None)`.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match find_config_file() {
            Some(path) => path,
            None => {
                warn!("No config file found, using defaults");
                return Ok(None);
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config: TomlConfig = toml::from_str(&content)?;
    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

/// Platform config file locations, first existing wins
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("lwai").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/lwai/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lwai"))
        .unwrap_or_else(|| PathBuf::from("./lwai_data"))
        .join("lwai.db")
}
