//! Qualified names and property paths
//!
//! A [`QualifiedName`] is a namespace URI plus a local name. It renders as
//! `[prefix]local` through a [`Registry`](crate::core::namespace::Registry),
//! and a [`PropertyPath`] renders as the dotted phrase of its parts, e.g.
//! `[xmpMM]DerivedFrom.[stRef]instanceID`.

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::Registry;
use std::fmt;

/// A (namespace URI, local name) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Namespace URI (may be empty for unqualified names)
    pub namespace: String,
    /// Local name
    pub local: String,
}

impl QualifiedName {
    /// Create a new qualified name
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Whether this is `{namespace}local`
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace == namespace && self.local == local
    }

    /// Render as `[prefix]local`, `[?]local` for unregistered namespaces
    pub fn render(&self, registry: &Registry) -> String {
        format!("[{}]{}", registry.prefix(&self.namespace), self.local)
    }
}

impl fmt::Display for QualifiedName {
    /// URI-qualified form, independent of any registry
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// Root-to-leaf sequence of qualified names
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath(Vec<QualifiedName>);

impl PropertyPath {
    /// Create an empty path
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: QualifiedName) {
        self.0.push(name);
    }

    pub fn pop(&mut self) -> Option<QualifiedName> {
        self.0.pop()
    }

    pub fn last(&self) -> Option<&QualifiedName> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[QualifiedName] {
        &self.0
    }

    /// A copy of this path extended by one name
    pub fn child(&self, name: QualifiedName) -> Self {
        let mut path = self.clone();
        path.push(name);
        path
    }

    /// Rendered `[prefix]local` segments, as used for index keys
    pub fn segments(&self, registry: &Registry) -> Vec<String> {
        self.0.iter().map(|name| name.render(registry)).collect()
    }

    /// Dotted phrase of the rendered segments
    pub fn phrase(&self, registry: &Registry) -> String {
        self.segments(registry).join(".")
    }
}

impl From<Vec<QualifiedName>> for PropertyPath {
    fn from(names: Vec<QualifiedName>) -> Self {
        Self(names)
    }
}

impl FromIterator<QualifiedName> for PropertyPath {
    fn from_iter<I: IntoIterator<Item = QualifiedName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Split a dotted phrase back into its rendered segments
///
/// Supports phrases like:
/// - `[xmp]Label` - single segment
/// - `[xmpMM]DerivedFrom.[stRef]instanceID` - nested
/// - `[?]Custom.[?]field` - unregistered namespaces
pub fn split_phrase(phrase: &str) -> XmpResult<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_prefix = false;
    let mut chars = phrase.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '[' if current.is_empty() => {
                in_prefix = true;
                current.push(ch);
            }
            ']' if in_prefix => {
                in_prefix = false;
                current.push(ch);
            }
            '.' if !in_prefix && chars.peek() == Some(&'[') => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    let well_formed = |s: &String| {
        s.starts_with('[')
            && s
                .find(']')
                .is_some_and(|close| close > 1 && close + 1 < s.len())
    };
    if segments.is_empty() || in_prefix || !segments.iter().all(well_formed) {
        return Err(XmpError::PropertyNotFound(phrase.to_string()));
    }
    Ok(segments)
}
