//! Data types shared by the annotator.
//!
//! This module contains the "model" structs and enums that flow through a
//! reconciliation pass: docblock tags, the categories they are grouped in,
//! the categorized candidate set produced by a tag generator, and the parsed
//! docblock itself.

use std::collections::{BTreeMap, HashSet};

/// A single docblock tag, e.g. `@property int $ID`.
///
/// `name` is stored without the leading `@`.  `content` is everything after
/// the name, trimmed, with continuation lines joined by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
    pub content: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// A `@property` tag.
    pub fn property(content: impl Into<String>) -> Self {
        Self::new("property", content)
    }

    /// A `@method` tag.
    pub fn method(content: impl Into<String>) -> Self {
        Self::new("method", content)
    }

    /// A `@mixin` tag.
    pub fn mixin(content: impl Into<String>) -> Self {
        Self::new("mixin", content)
    }

    /// The category an existing tag with this name is compared in.
    pub fn category(&self) -> TagCategory {
        TagCategory::for_tag_name(&self.name)
    }
}

/// Grouping used both for generation and for duplicate detection.
///
/// The declaration order is the order in which appended tags are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagCategory {
    Properties,
    Methods,
    Mixins,
    Other,
}

impl TagCategory {
    /// Every category, in serialization order.
    pub const ALL: [TagCategory; 4] = [
        TagCategory::Properties,
        TagCategory::Methods,
        TagCategory::Mixins,
        TagCategory::Other,
    ];

    /// Classify a tag by its exact name.
    ///
    /// Only `property`, `method` and `mixin` get their own bucket.  Variants
    /// such as `property-read` and every unknown name share `Other`.
    pub fn for_tag_name(name: &str) -> TagCategory {
        match name {
            "property" => TagCategory::Properties,
            "method" => TagCategory::Methods,
            "mixin" => TagCategory::Mixins,
            _ => TagCategory::Other,
        }
    }
}

/// Tags of one category, in insertion order, indexed by content.
#[derive(Debug, Clone, Default)]
struct TagBucket {
    tags: Vec<Tag>,
    contents: HashSet<String>,
}

/// Tags grouped by [`TagCategory`].
///
/// Within a category a content string appears at most once: inserting a tag
/// whose content is already present is a no-op and the first occurrence
/// keeps its position.
#[derive(Debug, Clone, Default)]
pub struct CategorizedTags {
    buckets: BTreeMap<TagCategory, TagBucket>,
}

impl CategorizedTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `tag` into `category`.  Returns `false` when a tag with the
    /// same content was already present in that category.
    pub fn insert(&mut self, category: TagCategory, tag: Tag) -> bool {
        let bucket = self.buckets.entry(category).or_default();
        if !bucket.contents.insert(tag.content.clone()) {
            return false;
        }
        bucket.tags.push(tag);
        true
    }

    /// Whether `category` holds a tag with exactly this content.
    pub fn contains(&self, category: TagCategory, content: &str) -> bool {
        self.buckets
            .get(&category)
            .is_some_and(|b| b.contents.contains(content))
    }

    /// The tags of one category, in insertion order.
    pub fn get(&self, category: TagCategory) -> &[Tag] {
        self.buckets
            .get(&category)
            .map(|b| b.tags.as_slice())
            .unwrap_or(&[])
    }

    /// Non-empty categories with their tags, in category order.
    pub fn categories(&self) -> impl Iterator<Item = (TagCategory, &[Tag])> {
        self.buckets
            .iter()
            .filter(|(_, b)| !b.tags.is_empty())
            .map(|(c, b)| (*c, b.tags.as_slice()))
    }

    /// Every tag, in category order then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.buckets.values().flat_map(|b| b.tags.iter())
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.tags.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the set, yielding every tag in category order.
    pub fn into_tags(self) -> Vec<Tag> {
        self.buckets.into_values().flat_map(|b| b.tags).collect()
    }
}

/// A parsed docblock: free-text description plus ordered tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocblockModel {
    pub description: String,
    pub tags: Vec<Tag>,
}

impl DocblockModel {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.tags.is_empty()
    }
}

// ─── Parsed PHP sources ─────────────────────────────────────────────────────

/// A docblock found in PHP source, with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocblock {
    pub text: String,
    pub start: u32,
    pub end: u32,
}

/// One entry of a static array property, e.g. `'Title' => 'Varchar'` or the
/// positional `Versioned::class`.
///
/// Keys and values hold normalised source text: quotes, a trailing
/// `::class` and a leading `\` are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: Option<String>,
    pub value: String,
}

/// A `static` array property declared on a class (`private static $db = [...]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticArray {
    /// Property name without the `$` prefix.
    pub name: String,
    pub entries: Vec<ConfigEntry>,
}

/// A class declaration extracted from a PHP source file.
#[derive(Debug, Clone)]
pub struct ParsedClass {
    /// Short class name (e.g. "User").
    pub name: String,
    /// Namespace-qualified name without a leading `\` (e.g. "App\Models\User").
    pub fqn: String,
    /// The `/** ... */` comment directly preceding the declaration.
    pub docblock: Option<SourceDocblock>,
    /// Byte offset where the declaration (including attributes and
    /// modifiers) starts.
    pub start_offset: u32,
    /// Static array properties, in declaration order.
    pub static_arrays: Vec<StaticArray>,
}

impl ParsedClass {
    /// Look up a static array property by name.
    pub fn static_array(&self, name: &str) -> Option<&StaticArray> {
        self.static_arrays.iter().find(|a| a.name == name)
    }

    /// The raw existing docblock text, or an empty string.
    pub fn docblock_text(&self) -> &str {
        self.docblock.as_ref().map(|d| d.text.as_str()).unwrap_or("")
    }
}
