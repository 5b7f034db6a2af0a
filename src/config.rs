/// Application configuration
///
/// Read from `<config_dir>/catalog-admin/config.yml` (or the path in
/// `CATALOG_ADMIN_CONFIG`). Every key is optional; a missing file means
/// defaults.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::view::PageSize;

pub const DEFAULT_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://via.placeholder.com/60";
const DEFAULT_THUMBNAIL_SIZE: u32 = 64;

const CONFIG_PATH_ENV: &str = "CATALOG_ADMIN_CONFIG";
const API_BASE_ENV: &str = "CATALOG_ADMIN_API_BASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// The config file as written by the user
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub page_size: Option<usize>,
    pub fallback_dataset: Option<PathBuf>,
    pub placeholder_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub thumbnail_size: Option<u32>,
}

/// Resolved settings used by the application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub page_size: PageSize,
    pub fallback_dataset: Option<PathBuf>,
    pub placeholder_url: String,
    pub request_timeout: Option<Duration>,
    pub thumbnail_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config::from_file(ConfigFile::default())
    }
}

impl Config {
    /// Load the config from its default location, falling back to defaults
    ///
    /// A malformed file is logged and ignored.
    pub fn load() -> Self {
        let path = env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);

        let file = match path {
            Some(path) => match read_config_file(&path, true) {
                Ok(file) => file,
                Err(err) => {
                    tracing::warn!(error = %err, "⚠️  ignoring config file, using defaults");
                    ConfigFile::default()
                }
            },
            None => ConfigFile::default(),
        };

        let mut config = Config::from_file(file);
        if let Ok(base) = env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                config.api_base_url = base.trim().to_string();
            }
        }
        config
    }

    /// Resolve defaults and check constrained values
    pub fn from_file(file: ConfigFile) -> Self {
        let page_size = match file.page_size {
            Some(rows) => PageSize::from_option(rows).unwrap_or_else(|| {
                tracing::warn!(rows, "page_size is not one of the offered sizes, using default");
                PageSize::default()
            }),
            None => PageSize::default(),
        };

        Config {
            api_base_url: file
                .api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            page_size,
            fallback_dataset: file.fallback_dataset,
            placeholder_url: file
                .placeholder_url
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_URL.to_string()),
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
            thumbnail_size: file
                .thumbnail_size
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_THUMBNAIL_SIZE),
        }
    }

    /// Places the fallback dataset is looked for, in order
    pub fn fallback_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = &self.fallback_dataset {
            candidates.push(path.clone());
        }
        if let Some(mut path) = dirs::data_dir() {
            path.push("catalog-admin");
            path.push("products.fixture.json");
            candidates.push(path);
        }
        candidates
    }
}

/// `<config_dir>/catalog-admin/config.yml`
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("catalog-admin");
    path.push("config.yml");
    Some(path)
}

pub fn read_config_file(path: &Path, allow_missing: bool) -> Result<ConfigFile, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents).map_err(|source| {
            ConfigError::Parse { path: path.to_path_buf(), source }
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
    }
}
