//! Array field types
//!
//! While an array-typed property is open the parser collects every token
//! below it as a [`Fragment`]. On close, [`ArrayFieldType::build`] checks that
//! the fragments are bounded by the expected RDF container (`rdf:Seq`,
//! `rdf:Bag` or `rdf:Alt`) and extracts one [`ArrayItem`] per `rdf:li`.

use crate::core::error::{XmpError, XmpResult};
use crate::core::name::{PropertyPath, QualifiedName};
use crate::core::namespace::Registry;
use crate::core::schemas::ns;
use crate::types::value::ScalarValue;
use std::collections::BTreeMap;

/// RDF container bounding an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// `rdf:Seq`
    Seq,
    /// `rdf:Bag`
    Bag,
    /// `rdf:Alt`
    Alt,
}

impl Container {
    pub fn local_name(&self) -> &'static str {
        match self {
            Container::Seq => "Seq",
            Container::Bag => "Bag",
            Container::Alt => "Alt",
        }
    }

    /// The anchor tag, e.g. `{rdf}Seq`
    pub fn tag(&self) -> QualifiedName {
        QualifiedName::new(ns::RDF, self.local_name())
    }
}

/// Declared type of an array field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayFieldType {
    Ordered,
    OrderedText,
    OrderedUri,
    OrderedResourceEvent,
    Unordered,
    UnorderedText,
    UnorderedAncestor,
    Alternative,
    LanguageAlternative,
}

impl ArrayFieldType {
    pub fn container(&self) -> Container {
        match self {
            ArrayFieldType::Ordered
            | ArrayFieldType::OrderedText
            | ArrayFieldType::OrderedUri
            | ArrayFieldType::OrderedResourceEvent => Container::Seq,
            ArrayFieldType::Unordered
            | ArrayFieldType::UnorderedText
            | ArrayFieldType::UnorderedAncestor => Container::Bag,
            ArrayFieldType::Alternative | ArrayFieldType::LanguageAlternative => Container::Alt,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArrayFieldType::Ordered => "OrderedArray",
            ArrayFieldType::OrderedText => "OrderedTextArray",
            ArrayFieldType::OrderedUri => "OrderedUriArray",
            ArrayFieldType::OrderedResourceEvent => "OrderedResourceEventArray",
            ArrayFieldType::Unordered => "UnorderedArray",
            ArrayFieldType::UnorderedText => "UnorderedTextArray",
            ArrayFieldType::UnorderedAncestor => "UnorderedAncestorArray",
            ArrayFieldType::Alternative => "AlternativeArray",
            ArrayFieldType::LanguageAlternative => "LanguageAlternativeArray",
        }
    }

    /// Validate the collected fragments and extract the array items
    pub fn build(
        &self,
        registry: &Registry,
        path: PropertyPath,
        fragments: Vec<Fragment>,
    ) -> XmpResult<ArrayValue> {
        let anchor = self.container().tag();
        validate_anchors(registry, &fragments, &anchor)?;

        let inner = &fragments[1..fragments.len() - 1];
        let items = extract_items(registry, inner)?;

        log::trace!(
            "built {} with {} item(s) at [{}]",
            self.name(),
            items.len(),
            path.phrase(registry)
        );
        Ok(ArrayValue {
            kind: *self,
            path,
            items,
        })
    }
}

/// One attribute as written, before type resolution
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute {
    pub name: QualifiedName,
    pub value: String,
}

impl RawAttribute {
    pub fn new(name: QualifiedName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// An open tag with its raw attributes
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTag {
    pub name: QualifiedName,
    pub attributes: Vec<RawAttribute>,
}

impl OpenTag {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: QualifiedName, value: impl Into<String>) -> Self {
        self.attributes.push(RawAttribute::new(name, value));
        self
    }
}

/// One collected token below an open array property
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Open(OpenTag),
    Close(QualifiedName),
    CharData(String),
    /// Parsed value of a struct field inside an item
    Value(QualifiedName, ScalarValue),
    /// Already built array nested inside an item
    Array(ArrayValue),
}

impl Fragment {
    fn describe(&self, registry: &Registry) -> String {
        match self {
            Fragment::Open(tag) => tag.name.render(registry),
            Fragment::Close(name) => format!("/{}", name.render(registry)),
            Fragment::CharData(_) => "char-data".to_string(),
            Fragment::Value(name, _) => format!("value of {}", name.render(registry)),
            Fragment::Array(value) => format!("array {}", value.path.phrase(registry)),
        }
    }
}

fn unexpected(registry: &Registry, expected: &QualifiedName, found: &Fragment) -> XmpError {
    XmpError::UnexpectedTag {
        expected: expected.render(registry),
        found: found.describe(registry),
    }
}

/// The fragments must open and close with the anchor tag
fn validate_anchors(
    registry: &Registry,
    fragments: &[Fragment],
    anchor: &QualifiedName,
) -> XmpResult<()> {
    let [first, .., last] = fragments else {
        return Err(XmpError::Structure(
            "expected at least two fragments for anchor-tag check".to_string(),
        ));
    };

    match first {
        Fragment::Open(tag) if tag.name == *anchor => {}
        other => return Err(unexpected(registry, anchor, other)),
    }
    match last {
        Fragment::Close(name) if name == anchor => Ok(()),
        other => Err(unexpected(registry, anchor, other)),
    }
}

/// Walk `rdf:li` groups: open, optional char-data or struct content, close
fn extract_items(registry: &Registry, mut rest: &[Fragment]) -> XmpResult<Vec<ArrayItem>> {
    let li = QualifiedName::new(ns::RDF, "li");
    let mut items = Vec::new();

    while let Some((first, tail)) = rest.split_first() {
        let open = match first {
            Fragment::Open(tag) if tag.name == li => tag,
            other => return Err(unexpected(registry, &li, other)),
        };

        let mut depth = 0usize;
        let mut close_at = None;
        for (i, fragment) in tail.iter().enumerate() {
            match fragment {
                Fragment::Open(_) => depth += 1,
                Fragment::Close(name) if depth == 0 && *name == li => {
                    close_at = Some(i);
                    break;
                }
                Fragment::Close(_) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        let Some(close_at) = close_at else {
            return Err(XmpError::UnexpectedTag {
                expected: format!("/{}", li.render(registry)),
                found: "end of array".to_string(),
            });
        };

        items.push(ArrayItem::from_fragments(registry, open, &tail[..close_at]));
        rest = &tail[close_at + 1..];
    }

    Ok(items)
}

/// One `rdf:li` entry
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    /// Tag name, `{rdf}li`
    pub name: QualifiedName,
    /// Parsed attributes plus any struct fields of the item
    pub attributes: BTreeMap<QualifiedName, ScalarValue>,
    /// Trimmed character data
    pub char_data: String,
    /// Arrays nested inside a struct item
    pub arrays: Vec<ArrayValue>,
}

impl ArrayItem {
    fn from_fragments(registry: &Registry, open: &OpenTag, body: &[Fragment]) -> Self {
        let mut item = ArrayItem {
            name: open.name.clone(),
            attributes: registry.parse_attributes(&open.attributes),
            char_data: String::new(),
            arrays: Vec::new(),
        };

        let mut depth = 0usize;
        for fragment in body {
            match fragment {
                Fragment::Open(tag) => {
                    depth += 1;
                    // struct wrappers and qualified fields both carry fields as attributes
                    item.attributes
                        .extend(registry.parse_attributes(&tag.attributes));
                }
                Fragment::Close(_) => depth = depth.saturating_sub(1),
                Fragment::CharData(text) if depth == 0 => {
                    item.char_data = text.trim().to_string();
                }
                Fragment::CharData(text) => {
                    log::trace!("ignoring nested char-data in array item: [{}]", text);
                }
                Fragment::Value(name, value) => {
                    item.attributes.insert(name.clone(), value.clone());
                }
                Fragment::Array(value) => item.arrays.push(value.clone()),
            }
        }
        item
    }

    /// `[p]a=[v] [p]b=[w]`, sorted by rendered name
    pub fn inline_attributes(&self, registry: &Registry) -> String {
        let mut parts: Vec<(String, String)> = self
            .attributes
            .iter()
            .map(|(name, value)| (name.render(registry), value.to_string()))
            .collect();
        parts.sort();
        parts
            .into_iter()
            .map(|(name, value)| format!("{}=[{}]", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Diagnostic rendering
    pub fn render(&self, registry: &Registry) -> String {
        format!(
            "ArrayItem<NAME={{{}}} ATTR={{{}}} CHAR-DATA=[{}]>",
            self.name.render(registry),
            self.inline_attributes(registry),
            self.char_data
        )
    }
}

/// A built array
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    kind: ArrayFieldType,
    path: PropertyPath,
    items: Vec<ArrayItem>,
}

impl ArrayValue {
    pub fn kind(&self) -> ArrayFieldType {
        self.kind
    }

    /// Path of the property owning the array
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Enumerate the items; may be called any number of times
    pub fn items(&self) -> std::slice::Iter<'_, ArrayItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flattened strings for text-like kinds, `None` for generic arrays
    pub fn string_items(&self, registry: &Registry) -> Option<Vec<String>> {
        let flatten = |item: &ArrayItem| match self.kind {
            ArrayFieldType::OrderedResourceEvent => Some(item.inline_attributes(registry)),
            ArrayFieldType::LanguageAlternative => Some(format!(
                "{{{}}} [{}]",
                item.inline_attributes(registry),
                item.char_data
            )),
            ArrayFieldType::OrderedText
            | ArrayFieldType::OrderedUri
            | ArrayFieldType::UnorderedText
            | ArrayFieldType::UnorderedAncestor => Some(item.char_data.clone()),
            ArrayFieldType::Ordered | ArrayFieldType::Unordered | ArrayFieldType::Alternative => {
                None
            }
        };
        self.items.iter().map(flatten).collect()
    }

    /// Diagnostic rendering
    pub fn render(&self, registry: &Registry) -> String {
        let items = match self.string_items(registry) {
            Some(strings) => strings,
            None => self.items.iter().map(|item| item.render(registry)).collect(),
        };
        format!("{}<{}>", self.kind.name(), items.join(", "))
    }
}
