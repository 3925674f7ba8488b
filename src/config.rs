//! Annotator configuration.
//!
//! Settings are read from a TOML file:
//!
//! ```toml
//! [markers]
//! start = "StartGeneratedWithDataObjectAnnotator"
//! end = "EndGeneratedWithDataObjectAnnotator"
//!
//! [classes]
//! include = ["App\\Models"]
//! exclude = ["App\\Models\\Legacy"]
//! ```
//!
//! Lookup order: an explicit path, then `.phpdoc-annotator.toml` in the
//! project root, then `phpdoc-annotator/config.toml` in the user's config
//! directory, then built-in defaults.  Missing keys take their defaults.

use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::docblock::Markers;
use crate::error::{AnnotatorError, Result};

/// File name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = ".phpdoc-annotator.toml";

/// Directory and file name looked up in the user's config directory.
const USER_CONFIG_DIR: &str = "phpdoc-annotator";
const USER_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotatorConfig {
    pub markers: Markers,
    pub classes: ClassFilter,
}

/// Which classes get annotated, by namespace prefix.
///
/// An empty `include` list selects every class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ClassFilter {
    pub fn selects(&self, fqn: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| in_namespace(fqn, p));
        included && !self.exclude.iter().any(|p| in_namespace(fqn, p))
    }
}

/// Whether `fqn` is `prefix` itself or lives below it.
fn in_namespace(fqn: &str, prefix: &str) -> bool {
    let fqn = fqn.trim_start_matches('\\');
    let prefix = prefix.trim_start_matches('\\').trim_end_matches('\\');
    if prefix.is_empty() {
        return true;
    }
    match fqn.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('\\'),
        None => false,
    }
}

impl AnnotatorConfig {
    /// Resolve and load the configuration for a project rooted at `root`.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(root, explicit) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The configuration file that [`load`](Self::load) would read.
    pub fn locate(root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let project = root.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }

        let user = choose_base_strategy()
            .ok()?
            .config_dir()
            .join(USER_CONFIG_DIR)
            .join(USER_CONFIG_FILE);
        user.is_file().then_some(user)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnnotatorError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_toml(&content).map_err(|message| AnnotatorError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Markers must be usable as whole-line literals inside a docblock
    /// without being mistaken for tags or terminating the comment.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let Markers { start, end } = &self.markers;
        for (which, marker) in [("start", start), ("end", end)] {
            if marker.trim().is_empty() {
                return Err(format!("{} marker must not be empty", which));
            }
            if marker.trim() != marker.as_str() {
                return Err(format!("{} marker must not have surrounding whitespace", which));
            }
            if marker.starts_with('@') {
                return Err(format!("{} marker must not start with '@'", which));
            }
            if marker.contains("*/") || marker.contains('\n') {
                return Err(format!("{} marker must fit on one comment line", which));
            }
        }
        if start == end {
            return Err("start and end markers must differ".to_string());
        }
        Ok(())
    }
}
