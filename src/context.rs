//! Per-invocation build context.
//!
//! Everything the original build description computed at load time (the
//! package version, the long description and the template list) is
//! gathered here once at process start and passed to whoever needs it.

use crate::config::{get_config, BuildConfig};
use crate::constants::FALLBACK_LONG_DESCRIPTION;
use crate::error::{Error, Result};
use crate::template::{discover_templates, TemplateFile};
use crate::version::{extract_version, VersionString};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BuildContext {
    pub project_root: PathBuf,
    pub config: BuildConfig,
    pub version: VersionString,
    pub long_description: String,
    pub templates: Vec<TemplateFile>,
}

impl BuildContext {
    /// Loads the configuration of `project_root` and builds the context.
    pub fn load<P: AsRef<Path>>(project_root: P) -> Result<Self> {
        let config = get_config(&project_root)?;
        Self::from_config(project_root, config)
    }

    /// Builds the context from an already loaded configuration.
    ///
    /// # Errors
    /// * `Error::VersionFormatError` / `Error::ReadError` from version extraction
    /// * `Error::ConfigError` for invalid template entries
    pub fn from_config<P: AsRef<Path>>(project_root: P, config: BuildConfig) -> Result<Self> {
        let project_root = project_root.as_ref().to_path_buf();

        let version = extract_version(project_root.join(&config.version_source))?;
        info!("Gmvault version = {version}");

        let long_description = read_long_description(&project_root.join(&config.readme))?;
        let templates = discover_templates(&project_root, &config.templates)?;

        Ok(Self {
            project_root,
            config,
            version,
            long_description,
            templates,
        })
    }

    pub fn default_credentials_path(&self) -> PathBuf {
        self.project_root.join(&self.config.default_credentials_file)
    }
}

fn read_long_description(readme: &Path) -> Result<String> {
    if !readme.exists() {
        return Ok(FALLBACK_LONG_DESCRIPTION.to_string());
    }
    let content = std::fs::read_to_string(readme).map_err(|source| Error::ReadError {
        path: readme.to_path_buf(),
        source,
    })?;
    Ok(format!("{content}\n\n"))
}
