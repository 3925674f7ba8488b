//! Docblock reconciliation.
//!
//! A pass takes a class's existing docblock text and produces the text that
//! should replace it:
//!
//!   1. strip legacy marker blocks
//!   2. parse what is left
//!   3. default an empty description to the class identifier
//!   4. ask the tag generator for candidate tags
//!   5. keep only the candidates not already present
//!   6. append them after the existing tags
//!   7. serialize
//!
//! Existing tags are never removed or reordered, so running a pass on its
//! own output changes nothing.

use tracing::debug;

use crate::docblock::{
    DocblockParser, DocblockSerializer, LegacyBlockStripper, Markers, PhpDoc, compute_novel_tags,
};
use crate::error::Result;
use crate::generator::TagGenerator;
use crate::resolver::ClassResolver;
use crate::types::DocblockModel;

/// Outcome of one pass, before serialization.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub model: DocblockModel,
    /// Number of generated tags appended to the existing ones.
    pub appended: usize,
    /// Whether legacy marker content was removed from the input.
    pub stripped_legacy: bool,
}

/// Merges generated tags into existing docblocks.
#[derive(Debug, Clone)]
pub struct DocblockReconciler<G, S = PhpDoc> {
    generator: G,
    syntax: S,
    stripper: LegacyBlockStripper,
}

impl<G: TagGenerator> DocblockReconciler<G, PhpDoc> {
    pub fn new(generator: G, markers: Markers) -> Self {
        Self::with_syntax(generator, PhpDoc, markers)
    }
}

impl<G, S> DocblockReconciler<G, S>
where
    G: TagGenerator,
    S: DocblockParser + DocblockSerializer,
{
    pub fn with_syntax(generator: G, syntax: S, markers: Markers) -> Self {
        Self {
            generator,
            syntax,
            stripper: LegacyBlockStripper::new(markers),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Reconcile `existing` (raw comment text, possibly empty) for `class`
    /// and return the replacement text.
    pub fn reconcile(&self, class: &str, existing: &str) -> Result<String> {
        let reconciliation = self.reconcile_model(class, existing)?;
        Ok(self.syntax.serialize(&reconciliation.model))
    }

    /// Look up the existing docblock through `resolver`, then reconcile it.
    ///
    /// A class the resolver cannot find aborts the pass.
    pub fn reconcile_class<R>(&self, resolver: &R, class: &str) -> Result<String>
    where
        R: ClassResolver + ?Sized,
    {
        let existing = resolver.resolve_existing_comment(class)?;
        self.reconcile(class, &existing)
    }

    /// Steps 1–6 of a pass, returning the merged model.
    pub fn reconcile_model(&self, class: &str, existing: &str) -> Result<Reconciliation> {
        let stripped = self.stripper.strip(existing);
        let stripped_legacy = stripped != existing;
        let mut model = self.syntax.parse(&stripped);

        if model.description.is_empty() {
            model.description = class.to_string();
        }

        let candidates = self.generator.generate_tags(class)?;
        let novel = compute_novel_tags(
            &model.tags,
            &candidates,
            self.generator.supported_categories(),
        );

        let appended = novel.len();
        model.tags.extend(novel.into_tags());

        debug!(
            class,
            candidates = candidates.len(),
            appended,
            "reconciled docblock"
        );

        Ok(Reconciliation {
            model,
            appended,
            stripped_legacy,
        })
    }

    /// Serialize a model produced by [`reconcile_model`](Self::reconcile_model).
    pub fn render(&self, model: &DocblockModel) -> String {
        self.syntax.serialize(model)
    }
}
