/// Class declaration extraction.
///
/// Walks top-level statements and namespace bodies, and for every `class`
/// records its fully-qualified name, preceding docblock, declaration offset
/// and static configuration arrays.  Interfaces, traits and enums carry no
/// dynamic members and are skipped.
use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::types::{ParsedClass, SourceDocblock};

use super::SourceCtx;
use super::static_config::extract_static_arrays;

/// Recursively walk statements and collect class declarations.
///
/// `namespace` is the namespace the statements live in.  A named
/// `namespace Foo;` statement also applies to the sibling statements that
/// follow it, which covers both the braced and the implicit form.
pub(crate) fn extract_classes_from_statements<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    namespace: Option<&str>,
    ctx: &SourceCtx<'a>,
    classes: &mut Vec<ParsedClass>,
) {
    let mut current_namespace: Option<String> = namespace.map(str::to_string);

    for statement in statements {
        match statement {
            Statement::Namespace(ns) => {
                let name = ns
                    .name
                    .as_ref()
                    .map(|ident| ident.value().to_string())
                    .filter(|n| !n.is_empty());
                extract_classes_from_statements(ns.statements().iter(), name.as_deref(), ctx, classes);
                current_namespace = name;
            }
            Statement::Class(class) => {
                let name = class.name.value.to_string();
                let fqn = match current_namespace.as_deref() {
                    Some(ns) => format!("{}\\{}", ns, name),
                    None => name.clone(),
                };

                let docblock = docblock_trivia_for_node(ctx.trivias, ctx.content, class).map(|t| {
                    SourceDocblock {
                        text: t.value.to_string(),
                        start: t.span.start.offset,
                        end: t.span.end.offset,
                    }
                });

                classes.push(ParsedClass {
                    name,
                    fqn,
                    docblock,
                    start_offset: class.span().start.offset,
                    static_arrays: extract_static_arrays(class.members.iter(), ctx.content),
                });
            }
            _ => {}
        }
    }
}

/// Find the `/** ... */` trivia directly preceding `node`.
///
/// Only whitespace and other comments may sit between the docblock and the
/// node; any code in between means the docblock belongs to something else.
pub fn docblock_trivia_for_node<'a>(
    trivia: &'a [Trivia<'a>],
    content: &str,
    node: &impl HasSpan,
) -> Option<&'a Trivia<'a>> {
    let node_start = node.span().start.offset;
    let candidate_idx = trivia.partition_point(|t| t.span.start.offset < node_start);
    if candidate_idx == 0 {
        return None;
    }

    let content_bytes = content.as_bytes();
    let mut covered_from = node_start;

    for i in (0..candidate_idx).rev() {
        let t = &trivia[i];
        let t_end = t.span.end.offset;

        let gap = content_bytes
            .get(t_end as usize..covered_from as usize)
            .unwrap_or(&[]);
        if !gap.iter().all(u8::is_ascii_whitespace) {
            return None;
        }

        match t.kind {
            TriviaKind::DocBlockComment => return Some(t),
            TriviaKind::WhiteSpace
            | TriviaKind::SingleLineComment
            | TriviaKind::MultiLineComment
            | TriviaKind::HashComment => {
                covered_from = t.span.start.offset;
            }
        }
    }

    None
}
