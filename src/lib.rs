//! gmvault-build prepares Gmvault sources before packaging.
//! It resolves the Google client credentials, renders the templated
//! sources with them, discovers the package version and runs the selected
//! packaging command with the credential step ordered ahead of it.

/// Native actions backed by external programs
pub mod action;

/// Command-line interface module
pub mod cli;

/// Build command descriptors and the shared credential options contract
pub mod command;

/// Optional project build configuration
/// Supports JSON and YAML formats (gmvault-build.json, .yml, .yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Per-invocation build context
pub mod context;

/// Credential resolution and the default credentials file
pub mod credentials;

/// Error types and handling
pub mod error;

/// Logger initialisation
pub mod logger;

/// Invocation state machine and step ordering
pub mod orchestrator;

/// Template rendering engine
pub mod renderer;

/// Template files, discovery and rendering to disk
pub mod template;

/// Version extraction by marker scan
pub mod version;
