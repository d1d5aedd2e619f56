use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wavenet_model::{DEFAULT_PROFILE_PICTURE, MAX_PROFILE_PICTURE_BYTES};

use crate::domains::profile::EmptyValuePolicy;

pub const BACKEND_URL_ENV: &str = "WAVENET_BACKEND_URL";
pub const IDENTITY_API_KEY_ENV: &str = "WAVENET_IDENTITY_API_KEY";

const APP_DIR: &str = "wavenet";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config")]
    Serialize(#[from] serde_json::Error),
}

/// Behaviour of the profile form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Largest picture accepted for upload, inclusive
    pub max_upload_bytes: u64,
    /// Image shown after "remove photo"
    pub default_profile_picture: String,
    /// Treat an emptied field as "no change" instead of an error
    pub allow_empty_as_no_change: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_PROFILE_PICTURE_BYTES,
            default_profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
            allow_empty_as_no_change: true,
        }
    }
}

impl FormConfig {
    pub fn empty_value_policy(&self) -> EmptyValuePolicy {
        EmptyValuePolicy::from_allow_empty(self.allow_empty_as_no_change)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub identity_endpoint: String,
    /// Without a key, password changes are disabled
    pub identity_api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub form: FormConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            identity_endpoint: "https://identitytoolkit.googleapis.com"
                .to_string(),
            identity_api_key: None,
            request_timeout_secs: 30,
            form: FormConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, then the user config file, then environment overrides.
    ///
    /// A missing or unreadable file falls back to defaults.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => config,
                Err(err) => {
                    warn!("[Config] {}; using defaults", err);
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// `<config dir>/wavenet/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = serde_json::from_str(&content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_error)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        match Self::default_path() {
            Some(path) => self.save_to(&path),
            None => {
                warn!("[Config] No config directory on this platform");
                Ok(())
            }
        }
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.is_empty()) {
            self.backend_url = url;
        }
        if let Some(key) =
            lookup(IDENTITY_API_KEY_ENV).filter(|v| !v.is_empty())
        {
            self.identity_api_key = Some(key);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
