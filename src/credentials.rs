//! Google credential resolution.
//! Determines the (client_id, secret) pair from command-line values, an
//! explicit credentials file, or the well-known default file, in that
//! order of precedence.

use crate::constants::{CLIENT_ID_KEY, CREDENTIALS_SECTION, SECRET_KEY};
use crate::error::{Error, Result};
use ini::{EscapePolicy, Ini, ParseOption};
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a resolved credential pair came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `--google-client-id` and `--google-secret`.
    Cli,
    /// `--google-credentials-file`.
    ExplicitFile(PathBuf),
    /// The well-known file at the project root.
    DefaultFile(PathBuf),
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Cli => write!(f, "command line"),
            CredentialSource::ExplicitFile(path) => {
                write!(f, "credentials file '{}'", path.display())
            }
            CredentialSource::DefaultFile(path) => {
                write!(f, "default credentials file '{}'", path.display())
            }
        }
    }
}

/// A fully resolved credential pair. Both fields are non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    pub client_id: String,
    pub secret: String,
    pub source: CredentialSource,
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

impl CredentialConfig {
    /// Template context exposing the pair under the `credentials` namespace.
    ///
    /// The `google_` prefixed names are kept for templates written against
    /// the historical variable names.
    pub fn to_context(&self) -> serde_json::Value {
        serde_json::json!({
            "credentials": {
                "client_id": self.client_id,
                "secret": self.secret,
                "google_client_id": self.client_id,
                "google_secret": self.secret,
            }
        })
    }
}

/// Resolves credentials against a fixed default file location.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    default_file: PathBuf,
}

impl CredentialResolver {
    pub fn new<P: Into<PathBuf>>(default_file: P) -> Self {
        Self {
            default_file: default_file.into(),
        }
    }

    pub fn default_file(&self) -> &Path {
        &self.default_file
    }

    /// Resolves the final credential pair.
    ///
    /// # Precedence
    /// 1. `credentials_file`, which must exist and hold both keys. Any
    ///    command-line values are ignored with a warning.
    /// 2. With no command-line values at all, the default file, validated
    ///    the same way.
    /// 3. Otherwise the command-line values, both of which must be non-empty.
    ///
    /// # Errors
    /// * `Error::ConfigError` on any missing file, key or value
    /// * `Error::ReadError` if a credentials file exists but cannot be read
    pub fn resolve(
        &self,
        client_id: Option<&str>,
        secret: Option<&str>,
        credentials_file: Option<&Path>,
    ) -> Result<CredentialConfig> {
        if let Some(path) = credentials_file {
            if !path.is_file() {
                return Err(Error::ConfigError(format!(
                    "credentials file '{}' does not exist",
                    path.display()
                )));
            }
            if client_id.is_some() || secret.is_some() {
                warn!(
                    "Credentials file '{}' overrides --google-client-id/--google-secret",
                    path.display()
                );
            }
            let (client_id, secret) = load_credentials_file(path)?;
            return Ok(CredentialConfig {
                client_id,
                secret,
                source: CredentialSource::ExplicitFile(path.to_path_buf()),
            });
        }

        if client_id.is_none() && secret.is_none() {
            if !self.default_file.is_file() {
                return Err(Error::ConfigError(format!(
                    "no credentials file or parameters specified, and default file '{}' was not found",
                    self.default_file.display()
                )));
            }
            warn!(
                "No credentials specified, using default credentials file '{}'",
                self.default_file.display()
            );
            let (client_id, secret) = load_credentials_file(&self.default_file)?;
            return Ok(CredentialConfig {
                client_id,
                secret,
                source: CredentialSource::DefaultFile(self.default_file.clone()),
            });
        }

        let client_id = client_id.filter(|v| !v.is_empty());
        let secret = secret.filter(|v| !v.is_empty());
        match (client_id, secret) {
            (Some(client_id), Some(secret)) => Ok(CredentialConfig {
                client_id: client_id.to_string(),
                secret: secret.to_string(),
                source: CredentialSource::Cli,
            }),
            (None, Some(_)) => Err(Error::ConfigError(
                "--google-client-id is missing or empty".to_string(),
            )),
            (Some(_), None) => Err(Error::ConfigError(
                "--google-secret is missing or empty".to_string(),
            )),
            (None, None) => Err(Error::ConfigError(
                "--google-client-id and --google-secret are empty".to_string(),
            )),
        }
    }
}

/// Reads `client_id` and `secret` from the `[DEFAULT]` section of an INI
/// file. Keys placed before any section header are accepted as well.
///
/// Values are taken verbatim: backslashes and quotes are not interpreted.
/// Key names match regardless of case.
pub fn load_credentials_file<P: AsRef<Path>>(path: P) -> Result<(String, String)> {
    let path = path.as_ref();
    debug!("Loading credentials from {}", path.display());

    let option = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let conf = Ini::load_from_file_opt(path, option).map_err(|e| match e {
        ini::Error::Io(source) => Error::ReadError {
            path: path.to_path_buf(),
            source,
        },
        ini::Error::Parse(e) => Error::ConfigError(format!(
            "credentials file '{}' is malformed: {e}",
            path.display()
        )),
    })?;

    let find = |section: Option<&str>, key: &str| -> Option<String> {
        conf.section(section)?
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(key))
            .map(|(_, value)| value.trim().to_string())
    };
    let lookup = |key: &str| -> Result<String> {
        find(Some(CREDENTIALS_SECTION), key)
            .or_else(|| find(None, key))
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "credentials file '{}' has no value for '{key}' in [{CREDENTIALS_SECTION}]",
                    path.display()
                ))
            })
    };

    Ok((lookup(CLIENT_ID_KEY)?, lookup(SECRET_KEY)?))
}

/// Writes a default credentials file from command-line credentials so later
/// builds can run without flags.
///
/// Only credentials of source [`CredentialSource::Cli`] are written, and an
/// existing file is never replaced. Returns whether a file was written.
pub fn maybe_write_default_credentials_file<P: AsRef<Path>>(
    creds: &CredentialConfig,
    default_file: P,
) -> Result<bool> {
    let default_file = default_file.as_ref();
    if creds.source != CredentialSource::Cli {
        return Ok(false);
    }
    if default_file.exists() {
        debug!(
            "Default credentials file '{}' already exists, leaving it untouched",
            default_file.display()
        );
        return Ok(false);
    }

    let mut conf = Ini::new();
    conf.with_section(Some(CREDENTIALS_SECTION))
        .set(CLIENT_ID_KEY, creds.client_id.as_str())
        .set(SECRET_KEY, creds.secret.as_str());
    conf.write_to_file_policy(default_file, EscapePolicy::Nothing)
        .map_err(|source| Error::WriteError {
            path: default_file.to_path_buf(),
            source,
        })?;

    info!("Saved credentials to '{}'", default_file.display());
    Ok(true)
}
