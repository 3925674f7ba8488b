//! Removal of legacy generated blocks.
//!
//! Older annotator runs wrapped their output between a start and an end
//! marker line:
//!
//! ```text
//! /**
//!  * StartGeneratedWithDataObjectAnnotator
//!  * @property string $Title
//!  * EndGeneratedWithDataObjectAnnotator
//!  */
//! ```
//!
//! Before an existing docblock is parsed, every such block is removed so
//! regenerated tags never pile up next to stale ones.  Removal happens in
//! two phases that can be invoked on their own:
//!
//! 1. [`LegacyBlockStripper::remove_generated_blocks`] drops each paired
//!    start…end span.
//! 2. [`LegacyBlockStripper::remove_orphan_markers`] drops marker lines left
//!    without a partner, which happens when someone merged generated
//!    content into a hand-written docblock by hand.

use serde::{Deserialize, Serialize};

/// Default start marker written by earlier annotator versions.
pub const DEFAULT_START_MARKER: &str = "StartGeneratedWithDataObjectAnnotator";

/// Default end marker written by earlier annotator versions.
pub const DEFAULT_END_MARKER: &str = "EndGeneratedWithDataObjectAnnotator";

/// The literal strings delimiting a generated block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Strips marker-delimited content from raw docblock text.
#[derive(Debug, Clone, Default)]
pub struct LegacyBlockStripper {
    markers: Markers,
}

impl LegacyBlockStripper {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Run both phases.  Text without markers is returned unchanged.
    pub fn strip(&self, raw: &str) -> String {
        let without_blocks = self.remove_generated_blocks(raw);
        self.remove_orphan_markers(&without_blocks)
    }

    /// Phase 1: collapse every start…end span into a single newline.
    ///
    /// A start marker pairs with the first end marker after it.  When the
    /// span is framed by a lone `/**` line right before and a lone `*/` line
    /// right after, the frame belongs to the span as well: the whole
    /// generated docblock disappears.
    pub fn remove_generated_blocks(&self, raw: &str) -> String {
        let lines: Vec<&str> = raw.split_inclusive('\n').collect();
        let mut out: Vec<&str> = Vec::with_capacity(lines.len());

        let mut i = 0;
        while i < lines.len() {
            if !is_marker_line(lines[i], &self.markers.start) {
                out.push(lines[i]);
                i += 1;
                continue;
            }

            let Some(end) = (i + 1..lines.len()).find(|&j| is_marker_line(lines[j], &self.markers.end))
            else {
                // Unpaired: phase 2 deals with it.
                out.push(lines[i]);
                i += 1;
                continue;
            };

            let framed = out.last().is_some_and(|l| l.trim() == "/**")
                && lines.get(end + 1).is_some_and(|l| l.trim() == "*/");
            if framed {
                out.pop();
                i = end + 2;
            } else {
                i = end + 1;
            }
            out.push("\n");
        }

        out.concat()
    }

    /// Phase 2: delete any remaining start or end marker line.
    pub fn remove_orphan_markers(&self, raw: &str) -> String {
        raw.split_inclusive('\n')
            .filter(|line| {
                !is_marker_line(line, &self.markers.start) && !is_marker_line(line, &self.markers.end)
            })
            .collect()
    }
}

/// Whether `line` holds nothing but `marker`, optionally behind the ` * `
/// comment decoration.
fn is_marker_line(line: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    line.trim().trim_start_matches('*').trim() == marker
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripper() -> LegacyBlockStripper {
        LegacyBlockStripper::new(Markers::new("START", "END"))
    }

    #[test]
    fn marker_line_detection() {
        assert!(is_marker_line(" * START\n", "START"));
        assert!(is_marker_line("START", "START"));
        assert!(is_marker_line("\t*\tSTART  \r\n", "START"));
        assert!(!is_marker_line(" * START here\n", "START"));
        assert!(!is_marker_line(" * @property START\n", "START"));
        assert!(!is_marker_line(" * \n", ""));
    }

    #[test]
    fn no_markers_is_a_no_op() {
        let text = "/**\n * Foo\n *\n * @property int $ID\n */";
        assert_eq!(stripper().strip(text), text);
    }

    #[test]
    fn framed_block_disappears_entirely() {
        let text = "/**\n * START\n * @property int $ID\n * END\n */\n";
        assert_eq!(stripper().remove_generated_blocks(text), "\n");
    }

    #[test]
    fn inner_block_collapses_to_newline() {
        let text = "/**\n * Foo\n * START\n * @property int $ID\n * END\n * @package App\n */";
        assert_eq!(
            stripper().remove_generated_blocks(text),
            "/**\n * Foo\n\n * @package App\n */"
        );
    }

    #[test]
    fn pairing_is_non_greedy() {
        let text = concat!(
            "/**\n",
            " * START\n",
            " * @property int $A\n",
            " * END\n",
            " * Keep me\n",
            " * START\n",
            " * @property int $B\n",
            " * END\n",
            " */",
        );
        let stripped = stripper().remove_generated_blocks(text);
        assert!(stripped.contains("Keep me"));
        assert!(!stripped.contains("$A"));
        assert!(!stripped.contains("$B"));
    }

    #[test]
    fn orphans_are_removed_in_phase_two() {
        let text = "/**\n * START\n * Foo\n * @property int $ID\n */";
        let after_blocks = stripper().remove_generated_blocks(text);
        assert_eq!(after_blocks, text);
        assert_eq!(
            stripper().remove_orphan_markers(&after_blocks),
            "/**\n * Foo\n * @property int $ID\n */"
        );
    }

    #[test]
    fn end_before_start_is_two_orphans() {
        let text = "/**\n * END\n * Foo\n * START\n */";
        assert_eq!(stripper().strip(text), "/**\n * Foo\n */");
    }
}
