#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use phpdoc_annotator::error::AnnotatorError;
use phpdoc_annotator::{CategorizedTags, ClassResolver, Result, Tag, TagCategory, TagGenerator};

/// A temporary project directory with an optional composer.json and PHP
/// files.  Removed when dropped.
pub struct TestWorkspace {
    dir: tempfile::TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        TestWorkspace { dir }
    }

    pub fn with_composer(composer_json: &str) -> Self {
        let ws = Self::new();
        ws.write_file("composer.json", composer_json);
        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.path(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full_path, content).expect("failed to write file");
        full_path
    }

    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.path(relative_path)).expect("failed to read file")
    }
}

/// composer.json mapping `App\` to `src/`.
pub const APP_COMPOSER_JSON: &str = r#"{
    "autoload": {
        "psr-4": {
            "App\\": "src/"
        }
    }
}"#;

/// A tag generator answering from a fixed table.  Unknown classes fail to
/// resolve.
#[derive(Default)]
pub struct FixedGenerator {
    pub tags: HashMap<String, CategorizedTags>,
}

impl FixedGenerator {
    pub fn with(mut self, class: &str, category: TagCategory, tag: Tag) -> Self {
        self.tags
            .entry(class.to_string())
            .or_default()
            .insert(category, tag);
        self
    }

    pub fn empty_for(mut self, class: &str) -> Self {
        self.tags.entry(class.to_string()).or_default();
        self
    }
}

impl TagGenerator for FixedGenerator {
    fn supported_categories(&self) -> &[TagCategory] {
        &TagCategory::ALL
    }

    fn generate_tags(&self, class: &str) -> Result<CategorizedTags> {
        self.tags
            .get(class)
            .cloned()
            .ok_or_else(|| AnnotatorError::resolution(class))
    }
}

/// A resolver answering from a fixed table of docblock texts.
#[derive(Default)]
pub struct FixedResolver {
    pub comments: HashMap<String, String>,
}

impl FixedResolver {
    pub fn with(mut self, class: &str, comment: &str) -> Self {
        self.comments.insert(class.to_string(), comment.to_string());
        self
    }
}

impl ClassResolver for FixedResolver {
    fn resolve_existing_comment(&self, class: &str) -> Result<String> {
        self.comments
            .get(class)
            .cloned()
            .ok_or_else(|| AnnotatorError::resolution(class))
    }
}
