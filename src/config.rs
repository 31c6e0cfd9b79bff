//! Runtime configuration, threaded explicitly through every command.

use std::path::PathBuf;

/// Remote corpus-list document fetched on first run or `corpus update`.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/DH-Box/corpus-downloader/master/corpus/corpus-list/corpus-list.yaml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Couldn't determine a per-user data directory; set CORPUS_DATA_DIR")]
    NoDataDir,

    #[error("Failed to read {key}: {reason}")]
    BadEnvVar { key: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Holds the cached registry document.
    pub data_dir: PathBuf,
    /// Default download destination for corpora.
    pub download_dir: PathBuf,
    /// Remote location of the registry document.
    pub registry_url: String,
}

impl Config {
    /// Build the configuration from environment overrides and per-user
    /// platform defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = match optional_env("CORPUS_DATA_DIR")? {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("corpus"))
                .ok_or(ConfigError::NoDataDir)?,
        };

        let download_dir = match optional_env("CORPUS_DOWNLOAD_DIR")? {
            Some(dir) => PathBuf::from(dir),
            None => data_dir.join("corpora"),
        };

        let registry_url = optional_env("CORPUS_REGISTRY_URL")?
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());

        Ok(Self {
            data_dir,
            download_dir,
            registry_url,
        })
    }
}

fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::BadEnvVar {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}
