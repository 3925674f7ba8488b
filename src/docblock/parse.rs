//! Raw docblock text → [`DocblockModel`].
//!
//! The parser never fails.  Anything that is not a
//! `/** ... */` comment is treated as an empty docblock so that a
//! hand-edited or truncated comment never aborts a reconciliation pass.

use tracing::debug;

use crate::types::{DocblockModel, Tag};

/// Parse raw comment text into a description and an ordered tag list.
///
/// Lines before the first `@tag` form the description (leading and
/// trailing blank lines dropped, inner blank lines kept).  Non-blank lines
/// following a tag line continue that tag's content.
pub fn parse_docblock(raw: &str) -> DocblockModel {
    let Some(inner) = docblock_inner(raw) else {
        if !raw.trim().is_empty() {
            debug!("malformed docblock treated as empty");
        }
        return DocblockModel::default();
    };

    let mut description: Vec<&str> = Vec::new();
    let mut tags: Vec<PendingTag<'_>> = Vec::new();

    for line in inner.lines() {
        let text = comment_line_text(line);

        if let Some((name, content)) = split_tag_line(text) {
            tags.push(PendingTag {
                name,
                lines: vec![content],
            });
            continue;
        }

        match tags.last_mut() {
            Some(pending) => {
                let continuation = text.trim();
                if !continuation.is_empty() {
                    pending.lines.push(continuation);
                }
            }
            None => description.push(text),
        }
    }

    DocblockModel {
        description: join_description(&description),
        tags: tags.into_iter().map(PendingTag::finish).collect(),
    }
}

/// A tag whose continuation lines are still being collected.
struct PendingTag<'a> {
    name: &'a str,
    lines: Vec<&'a str>,
}

impl PendingTag<'_> {
    fn finish(self) -> Tag {
        Tag::new(self.name, normalise_content(&self.lines.join("\n")))
    }
}

/// Tag content in the form it has after a serialize/parse round trip:
/// every line trimmed, blank lines dropped.
pub fn normalise_content(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The text between `/**` and `*/`, or `None` when `raw` is not a docblock.
fn docblock_inner(raw: &str) -> Option<&str> {
    raw.trim().strip_prefix("/**")?.strip_suffix("*/")
}

/// Strip the leading ` * ` decoration from one comment line.
fn comment_line_text(line: &str) -> &str {
    let trimmed = line.trim_start();
    let text = match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    };
    text.trim_end()
}

/// Split `@name content` into its parts.
///
/// The name may contain letters, digits, `-`, `_`, `\` and `:` (covering
/// `property-read`, `phpstan-return`, `ORM\Column`) and must be followed by
/// whitespace or the end of the line.
fn split_tag_line(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim_start().strip_prefix('@')?;
    let name_len = rest
        .find(|c: char| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '\\' | ':')))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }

    let (name, content) = rest.split_at(name_len);
    if !content.is_empty() && !content.starts_with(char::is_whitespace) {
        return None;
    }
    Some((name, content.trim()))
}

fn join_description(lines: &[&str]) -> String {
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_description_and_tags() {
        let doc = concat!(
            "/**\n",
            " * Class User\n",
            " *\n",
            " * @package App\n",
            " * @property int $ID\n",
            " */",
        );
        let model = parse_docblock(doc);
        assert_eq!(model.description, "Class User");
        assert_eq!(
            model.tags,
            vec![Tag::new("package", "App"), Tag::property("int $ID")]
        );
    }

    #[test]
    fn single_line_docblock() {
        let model = parse_docblock("/** * @property int $id */");
        assert!(model.description.is_empty());
        assert_eq!(model.tags, vec![Tag::property("int $id")]);
    }

    #[test]
    fn inline_var_without_star() {
        let model = parse_docblock("/** @var Foo */");
        assert_eq!(model.tags, vec![Tag::new("var", "Foo")]);
    }

    #[test]
    fn multi_line_description_keeps_inner_blank_lines() {
        let doc = "/**\n * First line.\n *\n * Second paragraph.\n */";
        let model = parse_docblock(doc);
        assert_eq!(model.description, "First line.\n\nSecond paragraph.");
        assert!(model.tags.is_empty());
    }

    #[test]
    fn continuation_lines_join_tag_content() {
        let doc = "/**\n * @deprecated use\n *   something else\n * @mixin Foo\n */";
        let model = parse_docblock(doc);
        assert_eq!(model.tags[0], Tag::new("deprecated", "use\nsomething else"));
        assert_eq!(model.tags[1], Tag::mixin("Foo"));
    }

    #[test]
    fn tag_without_content() {
        let model = parse_docblock("/**\n * @internal\n */");
        assert_eq!(model.tags, vec![Tag::new("internal", "")]);
    }

    #[test]
    fn hyphenated_and_namespaced_names() {
        let doc = "/**\n * @property-read string $Name\n * @ORM\\Entity\n */";
        let model = parse_docblock(doc);
        assert_eq!(model.tags[0].name, "property-read");
        assert_eq!(model.tags[1].name, "ORM\\Entity");
    }

    #[test]
    fn at_sign_inside_text_is_not_a_tag() {
        let model = parse_docblock("/**\n * Mail me@example.com\n * @foo.bar\n */");
        assert_eq!(model.description, "Mail me@example.com\n@foo.bar");
        assert!(model.tags.is_empty());
    }

    #[test]
    fn empty_and_malformed_input() {
        assert_eq!(parse_docblock(""), DocblockModel::default());
        assert_eq!(parse_docblock("\n"), DocblockModel::default());
        assert_eq!(parse_docblock("// not a docblock"), DocblockModel::default());
        assert_eq!(parse_docblock("/** unterminated"), DocblockModel::default());
        assert_eq!(parse_docblock("/**/"), DocblockModel::default());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let model = parse_docblock("\n\n/**\n * Foo\n */\n");
        assert_eq!(model.description, "Foo");
    }
}
