//! phpdoc_annotator keeps PHP class docblocks in sync with the dynamic
//! members a framework gives a class.
//!
//! A [`TagGenerator`] describes the members (`@property`, `@method`,
//! `@mixin`); the [`DocblockReconciler`] appends the ones a docblock does
//! not mention yet, without touching anything a developer wrote.  Content
//! left between marker comments by older, block-based annotator runs is
//! stripped first.
//!
//! Around that core:
//!
//! - [`parser`] finds class declarations, their docblocks and their
//!   `static` configuration arrays in PHP source.
//! - [`generator::StaticConfigTagGenerator`] turns that configuration into
//!   candidate tags.
//! - [`resolver`] looks classes up in parsed sources or through the
//!   project's PSR-4 autoload mappings ([`composer`]).
//! - [`annotate::Annotator`] writes the reconciled docblocks back.

pub mod annotate;
pub mod composer;
pub mod config;
pub mod docblock;
pub mod error;
pub mod generator;
pub mod logging;
pub mod parser;
pub mod reconcile;
pub mod resolver;
pub mod types;

pub use annotate::{AnnotateReport, Annotator, WriteMode};
pub use config::AnnotatorConfig;
pub use error::{AnnotatorError, Result};
pub use generator::{StaticConfigTagGenerator, TagGenerator};
pub use reconcile::{DocblockReconciler, Reconciliation};
pub use resolver::{ClassIndex, ClassLookup, ClassResolver, Workspace};
pub use types::{CategorizedTags, DocblockModel, Tag, TagCategory};
