//! PHPDoc block handling.
//!
//! This module turns raw `/** ... */` comment text into a [`DocblockModel`]
//! and back, strips content left behind by older marker-based annotator
//! runs, and computes which generated tags are not yet present in a
//! docblock.
//!
//! # Submodules
//!
//! - [`parse`]: tolerant raw text → model parsing.
//! - [`serialize`]: model → raw text.
//! - [`strip`]: removal of legacy marker-delimited blocks.
//! - [`merge`]: novel tag computation.
//!
//! Parsing and serialization sit behind the [`DocblockParser`] and
//! [`DocblockSerializer`] traits so the reconciler can be driven with a
//! different comment dialect; [`PhpDoc`] is the implementation used by the
//! annotator itself.

pub mod merge;
pub mod parse;
pub mod serialize;
pub mod strip;

use crate::types::DocblockModel;

pub use merge::{ExistingTagIndex, compute_novel_tags};
pub use strip::{LegacyBlockStripper, Markers};

/// Converts raw comment text into a [`DocblockModel`].
///
/// Implementations must not fail: empty or malformed input yields an empty
/// model.
pub trait DocblockParser {
    fn parse(&self, raw: &str) -> DocblockModel;
}

/// Converts a [`DocblockModel`] back into raw comment text, including the
/// `/**` and `*/` delimiters.
pub trait DocblockSerializer {
    fn serialize(&self, model: &DocblockModel) -> String;
}

/// The standard PHPDoc dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpDoc;

impl DocblockParser for PhpDoc {
    fn parse(&self, raw: &str) -> DocblockModel {
        parse::parse_docblock(raw)
    }
}

impl DocblockSerializer for PhpDoc {
    fn serialize(&self, model: &DocblockModel) -> String {
        serialize::serialize_docblock(model)
    }
}
