#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const CREDENTIAL_UTILS_TEMPLATE: &str = "CLIENT_ID = \"{{ credentials.client_id }}\"\nCLIENT_SECRET = \"{{ credentials.secret }}\"\n";
pub const CONST_TEMPLATE: &str = "GOOGLE_CLIENT_ID = '{{ credentials.google_client_id }}'\n";
pub const VERSION_SOURCE: &str = "import os\n\nGMVAULT_VERSION = \"1.9.1\"\n\ndef f():\n    pass\n";

pub fn write<P: AsRef<Path>>(root: &Path, relative: P, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project laid out like the gmvault source tree.
pub fn gmvault_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/gmv/gmvault_utils.py", VERSION_SOURCE);
    write(root, "src/gmv/credential_utils.tpy", CREDENTIAL_UTILS_TEMPLATE);
    write(root, "src/gmv/gmvault_const.tpy", CONST_TEMPLATE);
    write(root, "README.md", "# Gmvault");
    dir
}

pub fn write_credentials(path: &Path, client_id: &str, secret: &str) {
    fs::write(
        path,
        format!("[DEFAULT]\nclient_id = {client_id}\nsecret = {secret}\n"),
    )
    .unwrap();
}
