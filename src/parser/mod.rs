/// PHP parsing and class extraction.
///
/// This module parses PHP source text with the mago_syntax parser and
/// extracts, for every `class` declaration, what the annotator needs:
/// the fully-qualified name, the docblock directly above the declaration
/// (with its byte span so it can be replaced in place), and the class's
/// `static` array configuration.
///
/// Sub-modules:
/// - [`classes`]: statement walk, namespace tracking, docblock lookup
/// - [`static_config`]: `static` array property extraction
mod classes;
mod static_config;

use mago_syntax::ast::*;
use tracing::error;

use crate::types::ParsedClass;

pub use classes::docblock_trivia_for_node;

/// Source context shared by the extraction functions: the program's trivia
/// (comments/whitespace) and the raw text the spans point into.
pub(crate) struct SourceCtx<'a> {
    pub trivias: &'a [Trivia<'a>],
    pub content: &'a str,
}

/// Parse PHP source text and extract every class declaration.
///
/// Classes nested in namespace declarations get their namespace prepended.
/// A parser panic is logged and yields no classes.
pub fn parse_classes(content: &str) -> Vec<ParsedClass> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let arena = bumpalo::Bump::new();
        let file_id = mago_database::file::FileId::new("input.php");
        let program = mago_syntax::parser::parse_file_content(&arena, file_id, content);

        let ctx = SourceCtx {
            trivias: program.trivia.as_slice(),
            content,
        };

        let mut classes = Vec::new();
        classes::extract_classes_from_statements(program.statements.iter(), None, &ctx, &mut classes);
        classes
    }));

    match result {
        Ok(classes) => classes,
        Err(_) => {
            error!("parser panicked in parse_classes");
            Vec::new()
        }
    }
}
