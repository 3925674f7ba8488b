//! Novel tag computation.
//!
//! A generated tag is *novel* when no existing tag of the same category
//! carries the same content.  Existing tags are classified by name only
//! (see [`TagCategory::for_tag_name`]); candidates keep the category the
//! generator put them in.  A match in another category never suppresses a
//! candidate.

use std::collections::{HashMap, HashSet};

use crate::types::{CategorizedTags, Tag, TagCategory};

use super::parse::normalise_content;

/// Per-category lookup of the contents already present in a docblock.
#[derive(Debug, Default)]
pub struct ExistingTagIndex<'a> {
    buckets: HashMap<TagCategory, HashSet<&'a str>>,
}

impl<'a> ExistingTagIndex<'a> {
    /// Build the index, seeding an empty bucket for every supported
    /// category so lookups in categories without existing tags are
    /// well-defined.
    pub fn new(supported: &[TagCategory], existing: &'a [Tag]) -> Self {
        let mut buckets: HashMap<TagCategory, HashSet<&'a str>> = supported
            .iter()
            .map(|category| (*category, HashSet::new()))
            .collect();

        for tag in existing {
            buckets
                .entry(tag.category())
                .or_default()
                .insert(tag.content.as_str());
        }

        Self { buckets }
    }

    pub fn contains(&self, category: TagCategory, content: &str) -> bool {
        self.buckets
            .get(&category)
            .is_some_and(|contents| contents.contains(content))
    }
}

/// Return the candidates that are not already present among `existing`,
/// grouped by category in the generator's order.
///
/// Candidate content is compared and returned in its normalised form (see
/// [`normalise_content`]), the same form the parser produces for existing
/// tags.
pub fn compute_novel_tags(
    existing: &[Tag],
    candidates: &CategorizedTags,
    supported: &[TagCategory],
) -> CategorizedTags {
    let index = ExistingTagIndex::new(supported, existing);

    let mut novel = CategorizedTags::new();
    for (category, tags) in candidates.categories() {
        for tag in tags {
            let content = normalise_content(&tag.content);
            if !index.contains(category, &content) {
                novel.insert(category, Tag::new(tag.name.clone(), content));
            }
        }
    }
    novel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(entries: &[(TagCategory, Tag)]) -> CategorizedTags {
        let mut set = CategorizedTags::new();
        for (category, tag) in entries {
            set.insert(*category, tag.clone());
        }
        set
    }

    #[test]
    fn existing_tags_are_dropped() {
        let existing = vec![Tag::property("int $ID")];
        let cands = candidates(&[
            (TagCategory::Properties, Tag::property("int $ID")),
            (TagCategory::Properties, Tag::property("string $Title")),
        ]);
        let novel = compute_novel_tags(&existing, &cands, &TagCategory::ALL);
        assert_eq!(
            novel.get(TagCategory::Properties),
            &[Tag::property("string $Title")]
        );
    }

    #[test]
    fn other_category_does_not_suppress() {
        let existing = vec![Tag::new("var", "$foo string")];
        let cands = candidates(&[(TagCategory::Properties, Tag::property("$foo string"))]);
        let novel = compute_novel_tags(&existing, &cands, &TagCategory::ALL);
        assert_eq!(novel.len(), 1);
    }

    #[test]
    fn property_read_counts_as_other() {
        let existing = vec![Tag::new("property-read", "int $ID")];
        let cands = candidates(&[
            (TagCategory::Properties, Tag::property("int $ID")),
            (TagCategory::Other, Tag::new("property-read", "int $ID")),
        ]);
        let novel = compute_novel_tags(&existing, &cands, &TagCategory::ALL);
        assert_eq!(novel.get(TagCategory::Properties).len(), 1);
        assert!(novel.get(TagCategory::Other).is_empty());
    }

    #[test]
    fn order_follows_candidates() {
        let cands = candidates(&[
            (TagCategory::Mixins, Tag::mixin("B")),
            (TagCategory::Properties, Tag::property("int $Z")),
            (TagCategory::Properties, Tag::property("int $A")),
            (TagCategory::Methods, Tag::method("Foo Bar()")),
        ]);
        let novel = compute_novel_tags(&[], &cands, &[]);
        let contents: Vec<&str> = novel.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["int $Z", "int $A", "Foo Bar()", "B"]);
    }

    #[test]
    fn candidate_content_is_normalised() {
        let existing = vec![Tag::property("int $id")];
        let cands = candidates(&[
            (TagCategory::Properties, Tag::property("int $id ")),
            (TagCategory::Methods, Tag::method("  Foo bar()\n\n    with notes  ")),
        ]);
        let novel = compute_novel_tags(&existing, &cands, &TagCategory::ALL);
        assert!(novel.get(TagCategory::Properties).is_empty());
        assert_eq!(
            novel.get(TagCategory::Methods),
            &[Tag::method("Foo bar()\nwith notes")]
        );
    }

    #[test]
    fn unseeded_category_still_compares() {
        let existing = vec![Tag::mixin("Versioned")];
        let cands = candidates(&[(TagCategory::Mixins, Tag::mixin("Versioned"))]);
        let novel = compute_novel_tags(&existing, &cands, &[TagCategory::Properties]);
        assert!(novel.is_empty());
    }
}
