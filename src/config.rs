//! Build configuration.
//!
//! Configuration is an explicit value passed into
//! [`BuildEngine`](crate::engine::BuildEngine) and
//! [`ContentCache`](crate::cache::ContentCache) constructors; there is no
//! process-wide state and nothing to reset between builds; construct a fresh
//! instance instead.
//!
//! ## Config File
//!
//! All fields have defaults; a `config.toml` overrides only what it names.
//! Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! build_root = "public"     # Output files land under this directory
//! cache_root = "cache"      # Content-fingerprint cache location
//! delimiters = "{{ }}"      # Placeholder pair for path patterns
//! ```

use crate::resolve::Delimiters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Engine configuration.
///
/// Sparse override files are the norm: specify only the values that
/// differ from the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory all resolved output paths are joined under.
    pub build_root: PathBuf,
    /// Directory holding the content-fingerprint cache.
    pub cache_root: PathBuf,
    /// Default placeholder delimiter pair, as a whitespace-separated
    /// pair string (e.g. `"[[ ]]"`). Malformed pairs fall back to `{{ }}`.
    pub delimiters: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_root: PathBuf::from("public"),
            cache_root: PathBuf::from("cache"),
            delimiters: "{{ }}".to_string(),
        }
    }
}

impl BuildConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "build_root must not be empty".into(),
            ));
        }
        if self.cache_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "cache_root must not be empty".into(),
            ));
        }
        if self.delimiters.trim().is_empty() {
            return Err(ConfigError::Validation(
                "delimiters must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The configured delimiter pair.
    pub fn delimiter_pair(&self) -> Delimiters {
        Delimiters::parse(&self.delimiters)
    }
}
