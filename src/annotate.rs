//! Writing reconciled docblocks back into PHP sources.
//!
//! For every selected class in a file the annotator runs a reconciliation
//! pass and, when the pass produced something new, replaces the class's
//! docblock in place (or inserts one above the declaration).  A class whose
//! pass fails is reported and left untouched; the other classes in the
//! file, and the other files, are still processed.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use crate::config::AnnotatorConfig;
use crate::error::{AnnotatorError, Result};
use crate::generator::StaticConfigTagGenerator;
use crate::parser;
use crate::reconcile::DocblockReconciler;
use crate::resolver::ClassIndex;
use crate::types::ParsedClass;

/// What to do with files whose content changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write the updated content back to disk.
    #[default]
    Write,
    /// Keep the updated content in the report; touch nothing.
    DryRun,
    /// Only count what would change.
    Check,
}

/// Result of annotating a single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassOutcome {
    Updated,
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ClassReport {
    pub fqn: String,
    pub outcome: ClassOutcome,
}

/// Result of annotating one source text.
#[derive(Debug, Clone)]
pub struct SourceUpdate {
    pub content: String,
    pub classes: Vec<ClassReport>,
}

impl SourceUpdate {
    pub fn changed(&self) -> bool {
        self.classes
            .iter()
            .any(|c| c.outcome == ClassOutcome::Updated)
    }
}

/// A file whose content changed.  `updated` is only kept in
/// [`WriteMode::DryRun`].
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub updated: Option<String>,
}

/// A class or file that could not be processed.
#[derive(Debug, Clone)]
pub struct Failure {
    pub path: PathBuf,
    /// `None` when the whole file failed (e.g. it could not be read).
    pub class: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotateReport {
    pub files_scanned: usize,
    pub classes_updated: usize,
    pub changed: Vec<FileChange>,
    pub failures: Vec<Failure>,
}

impl AnnotateReport {
    pub fn files_changed(&self) -> usize {
        self.changed.len()
    }
}

/// A pending replacement of `start..end` in the source.
struct SourceEdit {
    start: usize,
    end: usize,
    text: String,
}

pub struct Annotator {
    config: AnnotatorConfig,
    mode: WriteMode,
}

impl Annotator {
    pub fn new(config: AnnotatorConfig, mode: WriteMode) -> Self {
        Self { config, mode }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Annotate every PHP file below `paths` (files or directories).
    pub fn annotate_paths(&self, paths: &[PathBuf]) -> AnnotateReport {
        let mut report = AnnotateReport::default();

        for path in collect_php_files(paths) {
            report.files_scanned += 1;

            let update = match self.annotate_file(&path) {
                Ok(update) => update,
                Err(e) => {
                    warn!(path = %path.display(), "skipping file: {}", e);
                    report.failures.push(Failure {
                        path,
                        class: None,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            for class in &update.classes {
                match &class.outcome {
                    ClassOutcome::Updated => report.classes_updated += 1,
                    ClassOutcome::Unchanged => {}
                    ClassOutcome::Failed(message) => report.failures.push(Failure {
                        path: path.clone(),
                        class: Some(class.fqn.clone()),
                        message: message.clone(),
                    }),
                }
            }

            if update.changed() {
                let updated = (self.mode == WriteMode::DryRun).then_some(update.content);
                report.changed.push(FileChange { path, updated });
            }
        }

        report
    }

    /// Annotate one file, writing it back in [`WriteMode::Write`].
    pub fn annotate_file(&self, path: &Path) -> Result<SourceUpdate> {
        let content = fs::read_to_string(path).map_err(|e| AnnotatorError::io(path, e))?;
        let update = self.annotate_source(&content);

        if update.changed() && self.mode == WriteMode::Write {
            fs::write(path, &update.content).map_err(|e| AnnotatorError::io(path, e))?;
            info!(path = %path.display(), "updated docblocks");
        }

        Ok(update)
    }

    /// Reconcile every selected class in `content` and splice the results
    /// back into the source.
    pub fn annotate_source(&self, content: &str) -> SourceUpdate {
        let classes = parser::parse_classes(content);
        let index = ClassIndex::from_classes(classes.iter().cloned());
        let reconciler = DocblockReconciler::new(
            StaticConfigTagGenerator::new(&index),
            self.config.markers.clone(),
        );
        let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };

        let mut edits: Vec<SourceEdit> = Vec::new();
        let mut reports = Vec::new();

        for class in &classes {
            if !self.config.classes.selects(&class.fqn) {
                debug!(class = %class.fqn, "class not selected");
                continue;
            }

            let outcome = match reconciler.reconcile_model(&class.fqn, class.docblock_text()) {
                Ok(r) if r.appended == 0 && !r.stripped_legacy => ClassOutcome::Unchanged,
                Ok(r) => {
                    let docblock = reconciler.render(&r.model);
                    let edit = plan_edit(content, class, &docblock, newline);
                    if content.get(edit.start..edit.end) == Some(edit.text.as_str()) {
                        ClassOutcome::Unchanged
                    } else {
                        edits.push(edit);
                        ClassOutcome::Updated
                    }
                }
                Err(e) => {
                    warn!(class = %class.fqn, "skipping class: {}", e);
                    ClassOutcome::Failed(e.to_string())
                }
            };

            reports.push(ClassReport {
                fqn: class.fqn.clone(),
                outcome,
            });
        }

        let mut updated = content.to_string();
        edits.sort_by(|a, b| b.start.cmp(&a.start));
        for edit in edits {
            updated.replace_range(edit.start..edit.end, &edit.text);
        }

        SourceUpdate {
            content: updated,
            classes: reports,
        }
    }
}

/// Where and how the new docblock goes: over the existing docblock, or in
/// front of the declaration, indented like the line it lands on.
fn plan_edit(content: &str, class: &ParsedClass, docblock: &str, newline: &str) -> SourceEdit {
    match &class.docblock {
        Some(existing) => {
            let start = existing.start as usize;
            SourceEdit {
                start,
                end: existing.end as usize,
                text: reindent(docblock, indentation_at(content, start), newline),
            }
        }
        None => {
            let start = class.start_offset as usize;
            let indent = indentation_at(content, start);
            SourceEdit {
                start,
                end: start,
                text: format!("{}{}{}", reindent(docblock, indent, newline), newline, indent),
            }
        }
    }
}

/// The whitespace between the start of the line and `offset`, or an empty
/// string when code precedes `offset` on that line.
fn indentation_at(content: &str, offset: usize) -> &str {
    let before = content.get(..offset).unwrap_or("");
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    let prefix = &before[line_start..];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

fn reindent(docblock: &str, indent: &str, newline: &str) -> String {
    docblock
        .lines()
        .collect::<Vec<_>>()
        .join(&format!("{}{}", newline, indent))
}

/// Every `.php` file under `paths`, sorted and de-duplicated.
pub fn collect_php_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        for entry in WalkBuilder::new(path).build() {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|t| t.is_file());
                    if is_file && is_php_file(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => warn!("failed to walk {}: {}", path.display(), e),
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

fn is_php_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "php")
}
