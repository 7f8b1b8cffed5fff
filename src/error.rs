//! Error handling for gmvault-build.
//! Defines the error taxonomy shared by credential resolution, template
//! rendering, version extraction and command orchestration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for build preparation.
///
/// Every variant is fatal for the current build invocation: nothing is
/// retried or downgraded to a warning.
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials are missing or malformed, or a named file does not exist
    /// or lacks the required keys.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// File system errors without a more specific path context.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A template, version source or credentials file could not be read.
    #[error("Cannot read '{}': {source}.", path.display())]
    ReadError { path: PathBuf, source: io::Error },

    /// A rendered file or credentials file could not be written.
    #[error("Cannot write '{}': {source}.", path.display())]
    WriteError { path: PathBuf, source: io::Error },

    /// The version marker was not found in the scanned file.
    #[error("Cannot find GMVAULT_VERSION in {}.", path.display())]
    VersionFormatError { path: PathBuf },

    /// Template syntax or rendering failure.
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// A native packaging action failed.
    #[error("Action error: {0}.")]
    ActionError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
