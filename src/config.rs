//! Project build configuration.
//! An optional `gmvault-build.{json,yml,yaml}` at the project root overrides
//! the default gmvault layout and declares the native action of each command.

use crate::constants::{
    CONFIG_FILES, DEFAULT_CREDENTIALS_FILE, DEFAULT_README, DEFAULT_TEMPLATES,
    DEFAULT_VERSION_SOURCE,
};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Template paths or glob patterns, relative to the project root.
    pub templates: Vec<String>,
    /// File scanned for the version marker.
    pub version_source: PathBuf,
    pub readme: PathBuf,
    pub default_credentials_file: PathBuf,
    /// Save command-line credentials to the default file when it is absent.
    pub write_default_credentials: bool,
    /// Program and arguments run as each command's native action.
    pub actions: IndexMap<String, Vec<String>>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
            version_source: PathBuf::from(DEFAULT_VERSION_SOURCE),
            readme: PathBuf::from(DEFAULT_README),
            default_credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            write_default_credentials: true,
            actions: IndexMap::new(),
        }
    }
}

/// Finds the first configuration file present in `project_root`.
pub fn find_config<P: AsRef<Path>>(project_root: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files
        .iter()
        .map(|file| project_root.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor YAML, or
///   carries unknown keys
pub fn parse_config(content: &str) -> Result<BuildConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the project configuration, falling back to defaults when no
/// configuration file exists.
pub fn get_config<P: AsRef<Path>>(project_root: P) -> Result<BuildConfig> {
    let Some(config_path) = find_config(&project_root, &CONFIG_FILES) else {
        debug!("No configuration file found, using defaults");
        return Ok(BuildConfig::default());
    };

    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(&config_path).map_err(|source| Error::ReadError {
        path: config_path.clone(),
        source,
    })?;
    parse_config(&content)
}
