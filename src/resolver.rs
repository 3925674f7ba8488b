//! Class lookup.
//!
//! Two capabilities are kept apart:
//!
//! - [`ClassResolver`] is all the reconciler needs: the raw docblock of a
//!   class, by identifier.
//! - [`ClassLookup`] returns the whole [`ParsedClass`], which the static
//!   config tag generator needs as well.
//!
//! [`ClassIndex`] serves classes from sources that were already parsed
//! (the annotator builds one per file); [`Workspace`] loads them on demand
//! through the project's PSR-4 autoload mappings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::composer::{self, Psr4Mapping};
use crate::error::{AnnotatorError, Result};
use crate::parser;
use crate::types::ParsedClass;

/// Looks up the raw docblock of a class.
pub trait ClassResolver {
    /// The class's current docblock text, or an empty string when it has
    /// none.  Fails with [`AnnotatorError::Resolution`] when `class` does
    /// not name a known class.
    fn resolve_existing_comment(&self, class: &str) -> Result<String>;
}

/// Looks up a parsed class declaration.
pub trait ClassLookup {
    fn find_class(&self, class: &str) -> Result<ParsedClass>;
}

impl<T: ClassLookup + ?Sized> ClassLookup for &T {
    fn find_class(&self, class: &str) -> Result<ParsedClass> {
        (**self).find_class(class)
    }
}

/// Strip the leading `\` of a fully-qualified name.
fn normalise_class_name(class: &str) -> &str {
    class.strip_prefix('\\').unwrap_or(class)
}

// ─── In-memory index ────────────────────────────────────────────────────────

/// Classes from already-parsed sources, keyed by fully-qualified name.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    classes: HashMap<String, ParsedClass>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `content` and index every class it declares.
    pub fn from_source(content: &str) -> Self {
        Self::from_classes(parser::parse_classes(content))
    }

    pub fn from_classes(classes: impl IntoIterator<Item = ParsedClass>) -> Self {
        let mut index = Self::new();
        for class in classes {
            index.insert(class);
        }
        index
    }

    pub fn insert(&mut self, class: ParsedClass) {
        self.classes.insert(class.fqn.clone(), class);
    }

    pub fn get(&self, class: &str) -> Option<&ParsedClass> {
        self.classes.get(normalise_class_name(class))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLookup for ClassIndex {
    fn find_class(&self, class: &str) -> Result<ParsedClass> {
        self.get(class)
            .cloned()
            .ok_or_else(|| AnnotatorError::resolution(class))
    }
}

impl ClassResolver for ClassIndex {
    fn resolve_existing_comment(&self, class: &str) -> Result<String> {
        self.get(class)
            .map(|c| c.docblock_text().to_string())
            .ok_or_else(|| AnnotatorError::resolution(class))
    }
}

// ─── PSR-4 workspace ────────────────────────────────────────────────────────

/// A project root plus its PSR-4 autoload mappings.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    mappings: Vec<Psr4Mapping>,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, mappings: Vec<Psr4Mapping>) -> Self {
        Self {
            root: root.into(),
            mappings,
        }
    }

    /// Read the PSR-4 mappings from `<root>/composer.json`.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mappings = composer::parse_composer_json(&root);
        debug!(root = %root.display(), mappings = mappings.len(), "loaded workspace");
        Self { root, mappings }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mappings(&self) -> &[Psr4Mapping] {
        &self.mappings
    }

    /// Existing PSR-4 source directories, or the root when there are none.
    pub fn source_directories(&self) -> Vec<PathBuf> {
        let dirs = composer::source_directories(&self.mappings, &self.root);
        if dirs.is_empty() {
            vec![self.root.clone()]
        } else {
            dirs
        }
    }

    /// The file a class would be autoloaded from, if it exists.
    pub fn class_path(&self, class: &str) -> Option<PathBuf> {
        composer::resolve_class_path(&self.mappings, &self.root, class)
    }
}

impl ClassLookup for Workspace {
    fn find_class(&self, class: &str) -> Result<ParsedClass> {
        let name = normalise_class_name(class);
        let path = self
            .class_path(name)
            .ok_or_else(|| AnnotatorError::resolution(class))?;
        let content = std::fs::read_to_string(&path).map_err(|e| AnnotatorError::io(&path, e))?;

        parser::parse_classes(&content)
            .into_iter()
            .find(|c| c.fqn == name)
            .ok_or_else(|| AnnotatorError::resolution(class))
    }
}

impl ClassResolver for Workspace {
    fn resolve_existing_comment(&self, class: &str) -> Result<String> {
        let parsed = self.find_class(class)?;
        Ok(parsed.docblock_text().to_string())
    }
}
