//! Property index
//!
//! Parsed properties are stored in a tree keyed by rendered qualified names
//! (`[prefix]local`). Each key at one level holds either a sub-index or a
//! non-empty list of leaf values; XMP permits repeated sibling properties, so
//! a leaf key can collect several values.
//!
//! The tree is an arena: nodes live in one vector and refer to their children
//! by position.

use crate::core::error::{XmpError, XmpResult};
use crate::core::name::{split_phrase, QualifiedName};
use crate::core::namespace::{Namespace, Registry};
use crate::types::{ArrayValue, ScalarValue};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A typed scalar with the namespace and field it was declared by
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarLeaf {
    pub namespace: Arc<Namespace>,
    pub field: String,
    pub value: ScalarValue,
}

/// A value stored at a leaf key
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    /// Element text parsed through its field type
    Scalar(ScalarLeaf),
    /// Parsed attributes of an element without declared scalar content
    Complex(BTreeMap<QualifiedName, ScalarValue>),
    /// A built array
    Array(ArrayValue),
}

impl LeafValue {
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            LeafValue::Scalar(leaf) => Some(&leaf.value),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&BTreeMap<QualifiedName, ScalarValue>> {
        match self {
            LeafValue::Complex(attributes) => Some(attributes),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            LeafValue::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Diagnostic rendering
    pub fn render(&self, registry: &Registry) -> String {
        match self {
            LeafValue::Scalar(leaf) => leaf.value.to_string(),
            LeafValue::Complex(attributes) => {
                let mut parts: Vec<String> = attributes
                    .iter()
                    .map(|(name, value)| format!("{}=[{}]", name.render(registry), value))
                    .collect();
                parts.sort();
                format!("Complex<{}>", parts.join(" "))
            }
            LeafValue::Array(array) => array.render(registry),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Slot {
    Subindex(usize),
    Leaves(Vec<LeafValue>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct IndexNode {
    pub(crate) entries: BTreeMap<String, Slot>,
}

/// Hierarchical index of parsed properties
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyIndex {
    nodes: Vec<IndexNode>,
}

impl PropertyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            nodes: vec![IndexNode::default()],
        }
    }

    pub(crate) fn node(&self, id: usize) -> &IndexNode {
        &self.nodes[id]
    }

    pub(crate) const ROOT: usize = 0;

    /// Append a value at a path of rendered segments
    ///
    /// Missing intermediate levels are created. Fails with `PathConflict` if
    /// a segment already holds the other kind of entry.
    pub fn add<S: AsRef<str>>(&mut self, path: &[S], value: LeafValue) -> XmpResult<()> {
        let Some((last, parents)) = path.split_last() else {
            return Err(XmpError::PathConflict("empty property path".to_string()));
        };
        let conflict = |depth: usize| {
            let phrase: Vec<&str> = path[..=depth].iter().map(AsRef::as_ref).collect();
            XmpError::PathConflict(phrase.join("."))
        };

        let mut node = Self::ROOT;
        for (depth, segment) in parents.iter().enumerate() {
            node = match self.nodes[node].entries.get(segment.as_ref()) {
                Some(Slot::Subindex(child)) => *child,
                Some(Slot::Leaves(_)) => return Err(conflict(depth)),
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(IndexNode::default());
                    self.nodes[node]
                        .entries
                        .insert(segment.as_ref().to_string(), Slot::Subindex(child));
                    child
                }
            };
        }

        match self.nodes[node].entries.entry(last.as_ref().to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(Slot::Leaves(vec![value]));
            }
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Slot::Leaves(values) => values.push(value),
                Slot::Subindex(_) => return Err(conflict(parents.len())),
            },
        }
        Ok(())
    }

    /// Values stored at a path of rendered segments
    ///
    /// Any missing segment yields `PropertyNotFound`.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> XmpResult<&[LeafValue]> {
        let not_found = || {
            let phrase: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
            XmpError::PropertyNotFound(phrase.join("."))
        };
        let (last, parents) = path.split_last().ok_or_else(not_found)?;

        let mut node = Self::ROOT;
        for segment in parents {
            match self.nodes[node].entries.get(segment.as_ref()) {
                Some(Slot::Subindex(child)) => node = *child,
                _ => return Err(not_found()),
            }
        }
        match self.nodes[node].entries.get(last.as_ref()) {
            Some(Slot::Leaves(values)) => Ok(values),
            _ => Err(not_found()),
        }
    }

    /// Values stored at a dotted phrase such as `[xmpMM]DerivedFrom.[stRef]instanceID`
    pub fn get_phrase(&self, phrase: &str) -> XmpResult<&[LeafValue]> {
        self.get(&split_phrase(phrase)?)
    }

    /// Total number of leaf values
    pub fn count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|node| node.entries.values())
            .map(|slot| match slot {
                Slot::Leaves(values) => values.len(),
                Slot::Subindex(_) => 0,
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Every leaf value with its dotted phrase, in key order
    pub fn leaves(&self) -> Vec<(String, &LeafValue)> {
        let mut out = Vec::new();
        self.collect_leaves(Self::ROOT, &mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        node: usize,
        prefix: &mut Vec<&'a str>,
        out: &mut Vec<(String, &'a LeafValue)>,
    ) {
        for (name, slot) in &self.nodes[node].entries {
            prefix.push(name);
            match slot {
                Slot::Subindex(child) => self.collect_leaves(*child, prefix, out),
                Slot::Leaves(values) => {
                    let phrase = prefix.join(".");
                    out.extend(values.iter().map(|value| (phrase.clone(), value)));
                }
            }
            prefix.pop();
        }
    }

    /// Human-readable listing, one `phrase = [value]` line per leaf
    pub fn dump(&self, registry: &Registry) -> String {
        self.leaves()
            .into_iter()
            .map(|(phrase, value)| format!("{} = [{}]\n", phrase, value.render(registry)))
            .collect()
    }
}

impl Default for PropertyIndex {
    fn default() -> Self {
        Self::new()
    }
}
