//! Candidate tag generation.
//!
//! A [`TagGenerator`] decides which dynamic members a class has and
//! describes them as tags.  The reconciler only consumes its output; it
//! never inspects classes itself.
//!
//! [`StaticConfigTagGenerator`] derives the tags from a class's `static`
//! configuration arrays:
//!
//! | static property       | tags                                          |
//! |-----------------------|-----------------------------------------------|
//! | `$db`                 | `@property <type> $Field`                     |
//! | `$has_one`            | `@property int $NameID`, `@method T Name()`   |
//! | `$belongs_to`         | `@method T Name()`                            |
//! | `$has_many`           | `@method HasManyList\|T[] Name()`             |
//! | `$many_many`          | `@method ManyManyList\|T[] Name()`            |
//! | `$belongs_many_many`  | `@method ManyManyList\|T[] Name()`            |
//! | `$extensions`         | `@mixin T`                                    |

use crate::error::Result;
use crate::resolver::ClassLookup;
use crate::types::{CategorizedTags, ConfigEntry, ParsedClass, Tag, TagCategory};

/// Produces the candidate tags for a class.
pub trait TagGenerator {
    /// Categories this generator can emit.  Used to seed the existing-tag
    /// lookup even when a category ends up with no candidates.
    fn supported_categories(&self) -> &[TagCategory];

    /// Candidate tags for `class`.  Fails with
    /// [`AnnotatorError::Resolution`](crate::error::AnnotatorError::Resolution)
    /// when the class cannot be found.
    fn generate_tags(&self, class: &str) -> Result<CategorizedTags>;
}

impl<T: TagGenerator + ?Sized> TagGenerator for &T {
    fn supported_categories(&self) -> &[TagCategory] {
        (**self).supported_categories()
    }

    fn generate_tags(&self, class: &str) -> Result<CategorizedTags> {
        (**self).generate_tags(class)
    }
}

/// Has-one target that stores the related class name alongside the id.
const POLYMORPHIC_TARGET: &str = "DataObject";

/// Generates tags from `static` configuration arrays.
#[derive(Debug, Clone)]
pub struct StaticConfigTagGenerator<L> {
    lookup: L,
}

impl<L: ClassLookup> StaticConfigTagGenerator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Candidate tags for an already-parsed class.
    pub fn tags_for(&self, class: &ParsedClass) -> CategorizedTags {
        let mut tags = CategorizedTags::new();

        for (field, spec) in keyed_entries(class, "db") {
            tags.insert(
                TagCategory::Properties,
                Tag::property(format!("{} ${}", db_field_type(spec), field)),
            );
        }

        for (relation, target) in keyed_entries(class, "has_one") {
            let Some(target) = relation_class(target) else {
                continue;
            };
            tags.insert(
                TagCategory::Properties,
                Tag::property(format!("int ${}ID", relation)),
            );
            if short_name(target) == POLYMORPHIC_TARGET {
                tags.insert(
                    TagCategory::Properties,
                    Tag::property(format!("string ${}Class", relation)),
                );
            }
            tags.insert(
                TagCategory::Methods,
                Tag::method(format!("{} {}()", target, relation)),
            );
        }

        for (relation, target) in keyed_entries(class, "belongs_to") {
            let Some(target) = relation_class(target) else {
                continue;
            };
            tags.insert(
                TagCategory::Methods,
                Tag::method(format!("{} {}()", target, relation)),
            );
        }

        for (relation, target) in keyed_entries(class, "has_many") {
            let Some(target) = relation_class(target) else {
                continue;
            };
            tags.insert(
                TagCategory::Methods,
                Tag::method(format!("HasManyList|{}[] {}()", target, relation)),
            );
        }

        for key in ["many_many", "belongs_many_many"] {
            for (relation, target) in keyed_entries(class, key) {
                let Some(target) = relation_class(target) else {
                    continue;
                };
                tags.insert(
                    TagCategory::Methods,
                    Tag::method(format!("ManyManyList|{}[] {}()", target, relation)),
                );
            }
        }

        if let Some(extensions) = class.static_array("extensions") {
            for entry in &extensions.entries {
                if let Some(extension) = extension_class(&entry.value) {
                    tags.insert(TagCategory::Mixins, Tag::mixin(extension));
                }
            }
        }

        tags
    }
}

impl<L: ClassLookup> TagGenerator for StaticConfigTagGenerator<L> {
    fn supported_categories(&self) -> &[TagCategory] {
        &TagCategory::ALL
    }

    fn generate_tags(&self, class: &str) -> Result<CategorizedTags> {
        let parsed = self.lookup.find_class(class)?;
        Ok(self.tags_for(&parsed))
    }
}

/// `(key, value)` pairs of a static array, skipping positional entries.
fn keyed_entries<'a>(
    class: &'a ParsedClass,
    name: &str,
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    class
        .static_array(name)
        .map(|a| a.entries.as_slice())
        .unwrap_or(&[])
        .iter()
        .filter_map(|ConfigEntry { key, value }| Some((key.as_deref()?, value.as_str())))
}

/// Map a db field spec such as `Varchar(255)` or `Enum("A,B")` to a PHP type.
pub fn db_field_type(spec: &str) -> &'static str {
    let base = spec.split('(').next().unwrap_or(spec).trim();
    let base = base.rsplit('\\').next().unwrap_or(base);
    let base = base.strip_prefix("DB").filter(|b| !b.is_empty()).unwrap_or(base);

    match base {
        "Int" | "Integer" | "BigInt" | "Year" | "ForeignKey" | "PrimaryKey" => "int",
        "Boolean" => "bool",
        "Float" | "Decimal" | "Double" | "Currency" | "Percentage" => "float",
        _ => "string",
    }
}

/// The class part of a relation target.  Dotted targets
/// (`'Member.Parent'`) name a reverse relation after the dot.
fn relation_class(target: &str) -> Option<&str> {
    class_name(target.split('.').next().unwrap_or(target))
}

/// Extensions may carry constructor arguments: `'Versioned("Stage")'`.
fn extension_class(value: &str) -> Option<&str> {
    class_name(value.split('(').next().unwrap_or(value))
}

/// `None` unless `text` is a single class-name token.
fn class_name(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty() && !text.contains(char::is_whitespace)).then_some(text)
}

/// Last segment of a possibly qualified class name.
fn short_name(class: &str) -> &str {
    class.rsplit('\\').next().unwrap_or(class)
}
