/// Static array configuration extraction.
///
/// Data-object style classes declare their fields and relations as
/// `private static` array properties:
///
/// ```php
/// private static $db = ['Title' => 'Varchar(255)'];
/// private static $has_one = ['Owner' => Member::class];
/// private static $extensions = [Versioned::class];
/// ```
///
/// Keys and values are recorded as normalised source text; only the
/// generator decides what they mean.
use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::types::{ConfigEntry, StaticArray};

/// Collect every `static` property whose default value is an array literal.
pub(crate) fn extract_static_arrays<'a>(
    members: impl Iterator<Item = &'a ClassLikeMember<'a>>,
    content: &str,
) -> Vec<StaticArray> {
    let mut arrays = Vec::new();

    for member in members {
        let ClassLikeMember::Property(property) = member else {
            continue;
        };
        if !property.modifiers().iter().any(|m| m.is_static()) {
            continue;
        }
        let Property::Plain(plain) = property else {
            continue;
        };

        for item in plain.items.iter() {
            let PropertyItem::Concrete(item) = item else {
                continue;
            };
            let Some(entries) = array_entries(&item.value, content) else {
                continue;
            };

            let raw_name = item.variable.name;
            let name = raw_name.strip_prefix('$').unwrap_or(raw_name).to_string();
            arrays.push(StaticArray { name, entries });
        }
    }

    arrays
}

/// Entries of an `[...]` or `array(...)` literal, or `None` for any other
/// expression.
fn array_entries(expr: &Expression<'_>, content: &str) -> Option<Vec<ConfigEntry>> {
    let elements: Vec<&ArrayElement<'_>> = match expr {
        Expression::Array(arr) => arr.elements.iter().collect(),
        Expression::LegacyArray(arr) => arr.elements.iter().collect(),
        _ => return None,
    };

    let entries = elements
        .into_iter()
        .filter_map(|element| match element {
            ArrayElement::KeyValue(kv) => Some(ConfigEntry {
                key: expression_text(kv.key, content),
                value: entry_value(kv.value, content)?,
            }),
            ArrayElement::Value(v) => Some(ConfigEntry {
                key: None,
                value: entry_value(v.value, content)?,
            }),
            ArrayElement::Variadic(_) | ArrayElement::Missing(_) => None,
        })
        .collect();

    Some(entries)
}

/// The value of one array entry.  A nested array is a "through" relation
/// (`['through' => PageTag::class, 'from' => ..., 'to' => ...]`) and stands
/// for its `through` class; nested arrays without one are skipped.
fn entry_value(expr: &Expression<'_>, content: &str) -> Option<String> {
    match expr {
        Expression::Array(_) | Expression::LegacyArray(_) => array_entries(expr, content)?
            .into_iter()
            .find(|entry| entry.key.as_deref() == Some(THROUGH_KEY))
            .map(|entry| entry.value),
        _ => expression_text(expr, content),
    }
}

const THROUGH_KEY: &str = "through";

/// The normalised source text of an expression.
fn expression_text(expr: &Expression<'_>, content: &str) -> Option<String> {
    let span = expr.span();
    let raw = content.get(span.start.offset as usize..span.end.offset as usize)?;
    let text = normalise_literal(raw);
    if text.is_empty() { None } else { Some(text) }
}

/// Turn a literal's source text into its value.
///
///   - `'Title'` / `"Title"` → `Title`
///   - `Member::class` / `\App\Member::class` → `Member` / `App\Member`
///   - `'App\\Member'` → `App\Member`
pub(crate) fn normalise_literal(raw: &str) -> String {
    let raw = raw.trim();

    let unquoted = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')));

    let text = match unquoted {
        Some(inner) => inner.replace("\\\\", "\\").replace("\\'", "'"),
        None => raw
            .strip_suffix("::class")
            .map(str::trim_end)
            .unwrap_or(raw)
            .to_string(),
    };

    text.strip_prefix('\\').unwrap_or(&text).to_string()
}
