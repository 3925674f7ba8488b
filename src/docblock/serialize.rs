//! [`DocblockModel`] → raw docblock text.

use crate::types::DocblockModel;

/// Render a model as a multi-line `/** ... */` comment.
///
/// ```text
/// /**
///  * Description
///  *
///  * @property int $ID
///  */
/// ```
///
/// The output has no indentation and no trailing newline; callers that
/// splice it into source re-indent every line after the first.
pub fn serialize_docblock(model: &DocblockModel) -> String {
    let mut lines: Vec<String> = vec!["/**".to_string()];

    let description = model.description.trim();
    if !description.is_empty() {
        lines.extend(description.lines().map(comment_line));
    }

    if !description.is_empty() && !model.tags.is_empty() {
        lines.push(comment_line(""));
    }

    for tag in &model.tags {
        let mut content = tag.content.lines();
        let head = match content.next() {
            Some(first) if !first.is_empty() => format!("@{} {}", tag.name, first),
            _ => format!("@{}", tag.name),
        };
        lines.push(comment_line(&head));
        lines.extend(content.map(comment_line));
    }

    lines.push(" */".to_string());
    lines.join("\n")
}

fn comment_line(text: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() {
        " *".to_string()
    } else {
        format!(" * {}", text)
    }
}
