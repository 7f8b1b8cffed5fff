//! Template files and their rendering into concrete source files.
//!
//! A template's destination is derived from its own path: `name.tpy`
//! renders to `name.py` and `name.ext.j2` renders to `name.ext`. Rendering
//! is a pure function of the template content and the credential pair.

use crate::credentials::CredentialConfig;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use globset::GlobBuilder;
use indexmap::IndexSet;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of Python templates and the extension they render to.
pub const PYTHON_TEMPLATE_EXTENSION: &str = "tpy";
pub const PYTHON_EXTENSION: &str = "py";

/// Generic template suffix, stripped as a whole.
pub const JINJA_SUFFIX: &str = ".j2";

/// A template source and the file it renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
}

impl TemplateFile {
    /// Builds a template entry, deriving the destination from `source_path`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the path carries no template suffix
    pub fn new<P: Into<PathBuf>>(source_path: P) -> Result<Self> {
        let source_path = source_path.into();
        let destination_path = destination_path(&source_path).ok_or_else(|| {
            Error::ConfigError(format!(
                "'{}' is not a template (expected a .{PYTHON_TEMPLATE_EXTENSION} or {JINJA_SUFFIX} suffix)",
                source_path.display()
            ))
        })?;
        Ok(Self {
            source_path,
            destination_path,
        })
    }
}

/// Returns true for `name.ext.j2` style file names.
pub fn is_jinja_template(filename: &str) -> bool {
    let parts: Vec<&str> = filename.split('.').collect();
    parts.len() > 2 && parts.last() == Some(&"j2")
}

/// Derives the rendered path of a template, or `None` for non-template paths.
pub fn destination_path(source: &Path) -> Option<PathBuf> {
    let filename = source.file_name()?.to_str()?;
    if source.extension().and_then(|e| e.to_str()) == Some(PYTHON_TEMPLATE_EXTENSION) {
        Some(source.with_extension(PYTHON_EXTENSION))
    } else if is_jinja_template(filename) {
        let new_name = filename.strip_suffix(JINJA_SUFFIX)?;
        Some(source.with_file_name(new_name))
    } else {
        None
    }
}

fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '[', '{'])
}

/// Expands configured template entries into an ordered, duplicate-free list.
///
/// Plain entries are taken as paths relative to `root`. Entries containing
/// glob syntax are matched against files under `root`, visited in file name
/// order so the result does not depend on directory listing order.
pub fn discover_templates<P: AsRef<Path>>(root: P, entries: &[String]) -> Result<Vec<TemplateFile>> {
    let root = root.as_ref();
    let mut sources = IndexSet::new();

    for entry in entries {
        if !is_glob(entry) {
            sources.insert(root.join(entry));
            continue;
        }

        let matcher = GlobBuilder::new(entry)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::ConfigError(format!("invalid template pattern '{entry}': {e}")))?
            .compile_matcher();

        let mut matched = false;
        for dir_entry in WalkDir::new(root).sort_by_file_name() {
            let dir_entry = dir_entry.map_err(|e| Error::IoError(e.into()))?;
            if !dir_entry.file_type().is_file() {
                continue;
            }
            let relative = dir_entry.path().strip_prefix(root).unwrap_or(dir_entry.path());
            if matcher.is_match(relative) {
                matched = true;
                sources.insert(dir_entry.path().to_path_buf());
            }
        }
        if !matched {
            warn!("Template pattern '{entry}' matched no files");
        }
    }

    sources.into_iter().map(TemplateFile::new).collect()
}

/// Renders one template to its destination.
///
/// Returns whether the destination was written; a destination that already
/// holds the rendered bytes is left untouched.
pub fn render_template(
    renderer: &dyn TemplateRenderer,
    template: &TemplateFile,
    context: &serde_json::Value,
) -> Result<bool> {
    let source = &template.source_path;
    let destination = &template.destination_path;

    let content = fs::read_to_string(source).map_err(|source_err| Error::ReadError {
        path: source.clone(),
        source: source_err,
    })?;
    let rendered = renderer.render(&source.display().to_string(), &content, context)?;

    if fs::read(destination).is_ok_and(|existing| existing == rendered.as_bytes()) {
        debug!("Unchanged: '{}'", destination.display());
        return Ok(false);
    }

    fs::write(destination, rendered).map_err(|source_err| Error::WriteError {
        path: destination.clone(),
        source: source_err,
    })?;
    debug!("Rendered '{}' -> '{}'", source.display(), destination.display());
    Ok(true)
}

/// Renders every template in order with the given credential pair.
///
/// The first failure aborts the remaining templates.
pub fn render_templates(
    renderer: &dyn TemplateRenderer,
    templates: &[TemplateFile],
    creds: &CredentialConfig,
) -> Result<()> {
    let context = creds.to_context();
    let mut written = 0;
    for template in templates {
        if render_template(renderer, template, &context)? {
            written += 1;
        }
    }
    info!(
        "Rendered {} template(s) with credentials from {} ({written} updated)",
        templates.len(),
        creds.source
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_jinja_template() {
        assert!(is_jinja_template("template.html.j2"));
        assert!(is_jinja_template("file.txt.j2"));
        assert!(!is_jinja_template("regular.html"));
        assert!(!is_jinja_template("file.j2"));
        assert!(!is_jinja_template("file.j2txt"));
    }

    #[test]
    fn test_is_glob() {
        assert!(is_glob("src/**/*.tpy"));
        assert!(is_glob("src/gmv/const.t?y"));
        assert!(!is_glob("src/gmv/gmvault_const.tpy"));
    }
}
