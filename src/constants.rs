//! Common constants used throughout gmvault-build.

/// Supported build configuration file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["gmvault-build.json", "gmvault-build.yml", "gmvault-build.yaml"];

/// Well-known credentials file, relative to the project root.
pub const DEFAULT_CREDENTIALS_FILE: &str = "google_credentials.ini";

/// INI section holding the credential keys.
pub const CREDENTIALS_SECTION: &str = "DEFAULT";
pub const CLIENT_ID_KEY: &str = "client_id";
pub const SECRET_KEY: &str = "secret";

/// Templates rendered when the project configuration does not list any.
pub const DEFAULT_TEMPLATES: [&str; 2] = ["src/gmv/credential_utils.tpy", "src/gmv/gmvault_const.tpy"];

/// File scanned for the version marker.
pub const DEFAULT_VERSION_SOURCE: &str = "src/gmv/gmvault_utils.py";
pub const VERSION_MARKER: &str = "GMVAULT_VERSION = \"";

pub const DEFAULT_README: &str = "README.md";

/// Long description used when the README is absent.
pub const FALLBACK_LONG_DESCRIPTION: &str = "Gmvault";

/// Environment variable carrying the version into native actions.
pub const VERSION_ENV: &str = "GMVAULT_VERSION";
