//! Namespace registry for XMP
//!
//! A [`Namespace`] is a URI, a preferred prefix and a field table mapping local
//! names to [`FieldType`]s. A [`Registry`] holds the namespaces a parse knows
//! about and resolves qualified names to field types and display prefixes.
//!
//! Registries are plain values: build one, register namespaces through
//! `&mut`, then share it by reference with any number of parses. The
//! process-wide [`standard_registry`] is built lazily and never mutated.

use crate::core::error::{XmpError, XmpResult};
use crate::core::name::QualifiedName;
use crate::core::schemas;
use crate::types::array::RawAttribute;
use crate::types::{ArrayFieldType, FieldType, ScalarValue};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static STANDARD_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Prefix rendered for URIs without a registered namespace
pub const UNKNOWN_PREFIX: &str = "?";

/// A namespace and its field table
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    uri: String,
    prefix: String,
    fields: HashMap<String, FieldType>,
}

impl Namespace {
    /// Create a namespace with an empty field table
    pub fn new(uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            prefix: prefix.into(),
            fields: HashMap::new(),
        }
    }

    /// Declare one field
    pub fn with_field(mut self, local: impl Into<String>, kind: impl Into<FieldType>) -> Self {
        self.fields.insert(local.into(), kind.into());
        self
    }

    /// Declare several fields
    pub fn with_fields<S, K>(mut self, fields: impl IntoIterator<Item = (S, K)>) -> Self
    where
        S: Into<String>,
        K: Into<FieldType>,
    {
        self.fields
            .extend(fields.into_iter().map(|(l, k)| (l.into(), k.into())));
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Declared type of a local field name
    pub fn field_type(&self, local: &str) -> Option<&FieldType> {
        self.fields.get(local)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Namespace lookup service with a cached URI to prefix map
#[derive(Debug, Default)]
pub struct Registry {
    namespaces: HashMap<String, Arc<Namespace>>,
    prefix_cache: RwLock<HashMap<String, String>>,
    resolutions: AtomicUsize,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every standard namespace table
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for namespace in schemas::standard_namespaces() {
            registry
                .namespaces
                .entry(namespace.uri.clone())
                .or_insert_with(|| Arc::new(namespace));
        }
        registry
    }

    /// Register a namespace
    ///
    /// # Returns
    ///
    /// Returns `DuplicateNamespace` if the URI is already registered
    pub fn register(&mut self, namespace: Namespace) -> XmpResult<()> {
        if self.namespaces.contains_key(&namespace.uri) {
            return Err(XmpError::DuplicateNamespace(namespace.uri));
        }

        // a previous miss may have cached "?" for this URI
        self.prefix_cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&namespace.uri);
        self.namespaces
            .insert(namespace.uri.clone(), Arc::new(namespace));
        Ok(())
    }

    /// Look up a namespace by URI
    pub fn get(&self, uri: &str) -> XmpResult<Arc<Namespace>> {
        self.namespaces
            .get(uri)
            .cloned()
            .ok_or_else(|| XmpError::NamespaceNotFound(uri.to_string()))
    }

    /// Check if a namespace URI is registered
    pub fn contains(&self, uri: &str) -> bool {
        self.namespaces.contains_key(uri)
    }

    /// Remove every namespace and every cached prefix
    pub fn clear(&mut self) {
        self.namespaces.clear();
        self.prefix_cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// All registered namespaces, in no particular order
    pub fn namespaces(&self) -> impl Iterator<Item = &Arc<Namespace>> {
        self.namespaces.values()
    }

    /// Preferred prefix of a URI, `?` when unregistered
    ///
    /// Results are cached; an unregistered URI is reported once.
    pub fn prefix(&self, uri: &str) -> String {
        if let Some(prefix) = self
            .prefix_cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uri)
        {
            return prefix.clone();
        }

        self.resolutions.fetch_add(1, Ordering::Relaxed);
        let prefix = match self.namespaces.get(uri) {
            Some(namespace) => namespace.prefix.clone(),
            None => {
                log::warn!("Namespace [{}] is not registered", uri);
                UNKNOWN_PREFIX.to_string()
            }
        };
        self.prefix_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uri.to_string(), prefix.clone());
        prefix
    }

    /// Number of prefix lookups that missed the cache
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    /// Declared type of a qualified field name
    pub fn field_type(&self, name: &QualifiedName) -> XmpResult<&FieldType> {
        let namespace = self
            .namespaces
            .get(&name.namespace)
            .ok_or_else(|| XmpError::NamespaceNotFound(name.namespace.clone()))?;
        namespace
            .field_type(&name.local)
            .ok_or_else(|| XmpError::FieldNotFound {
                namespace: namespace.prefix.clone(),
                field: name.local.clone(),
            })
    }

    /// Array type of a field, `None` for scalar or unknown fields
    pub fn array_type(&self, name: &QualifiedName) -> Option<ArrayFieldType> {
        self.field_type(name).ok().and_then(FieldType::as_array)
    }

    /// Parse raw text as the declared scalar type of a field
    pub fn parse_value(&self, name: &QualifiedName, raw: &str) -> XmpResult<ScalarValue> {
        match self.field_type(name)? {
            FieldType::Scalar(kind) => kind.parse(raw),
            FieldType::Array(kind) => Err(XmpError::value_not_valid(kind.name(), raw)),
        }
    }

    /// Parse attributes through their field types
    ///
    /// Attributes in unknown namespaces, unknown fields and invalid values are
    /// logged and skipped. RDF syntax attributes (`rdf:about`,
    /// `rdf:parseType`, ...) are skipped silently.
    pub fn parse_attributes(
        &self,
        attributes: &[RawAttribute],
    ) -> BTreeMap<QualifiedName, ScalarValue> {
        let mut parsed = BTreeMap::new();
        for attribute in attributes {
            if attribute.name.namespace == schemas::ns::RDF {
                continue;
            }
            match self.parse_value(&attribute.name, &attribute.value) {
                Ok(value) => {
                    parsed.insert(attribute.name.clone(), value);
                }
                Err(XmpError::NamespaceNotFound(uri)) => {
                    log::debug!(
                        "Namespace [{}] for attribute [{}] is not known. Skipping.",
                        uri,
                        attribute.name.local
                    );
                }
                Err(err) => {
                    log::warn!(
                        "Could not parse attribute {} value [{}]: {}",
                        attribute.name.render(self),
                        attribute.value,
                        err
                    );
                }
            }
        }
        parsed
    }
}

/// The shared registry of standard namespaces
pub fn standard_registry() -> &'static Registry {
    STANDARD_REGISTRY.get_or_init(Registry::standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schemas::ns;
    use crate::types::ScalarFieldType;

    fn example() -> Namespace {
        Namespace::new("http://example.com/ns/", "ex")
            .with_field("Flag", ScalarFieldType::Boolean)
            .with_field("Tags", ArrayFieldType::UnorderedText)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        registry.register(example()).unwrap();
        let namespace = registry.get("http://example.com/ns/").unwrap();
        assert_eq!(namespace.prefix(), "ex");
        assert_eq!(namespace.field_count(), 2);
    }

    #[test]
    fn test_duplicate_namespace() {
        let mut registry = Registry::new();
        registry.register(example()).unwrap();
        let err = registry.register(example()).unwrap_err();
        assert!(matches!(err, XmpError::DuplicateNamespace(_)));
    }

    #[test]
    fn test_missing_namespace() {
        let registry = Registry::new();
        assert!(matches!(
            registry.get("urn:nothing"),
            Err(XmpError::NamespaceNotFound(_))
        ));
    }

    #[test]
    fn test_prefix_cache() {
        let mut registry = Registry::new();
        assert_eq!(registry.prefix("http://example.com/ns/"), "?");
        assert_eq!(registry.prefix("http://example.com/ns/"), "?");
        assert_eq!(registry.resolutions(), 1);

        // registering evicts the cached miss
        registry.register(example()).unwrap();
        assert_eq!(registry.prefix("http://example.com/ns/"), "ex");
        assert_eq!(registry.prefix("http://example.com/ns/"), "ex");
        assert_eq!(registry.resolutions(), 2);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.prefix("http://example.com/ns/"), "?");
        assert_eq!(registry.resolutions(), 3);
    }

    #[test]
    fn test_field_lookup() {
        let mut registry = Registry::new();
        registry.register(example()).unwrap();

        let flag = QualifiedName::new("http://example.com/ns/", "Flag");
        let tags = QualifiedName::new("http://example.com/ns/", "Tags");
        let other = QualifiedName::new("http://example.com/ns/", "Other");

        assert_eq!(
            registry.parse_value(&flag, "True").unwrap(),
            ScalarValue::Boolean(true)
        );
        assert_eq!(registry.array_type(&tags), Some(ArrayFieldType::UnorderedText));
        assert_eq!(registry.array_type(&flag), None);
        assert!(matches!(
            registry.parse_value(&other, "x"),
            Err(XmpError::FieldNotFound { .. })
        ));
        assert!(matches!(
            registry.parse_value(&tags, "x"),
            Err(XmpError::ValueNotValid { .. })
        ));
    }

    #[test]
    fn test_parse_attributes_skips_bad_values() {
        let mut registry = Registry::new();
        registry.register(example()).unwrap();
        let attributes = vec![
            RawAttribute::new(QualifiedName::new("http://example.com/ns/", "Flag"), "True"),
            RawAttribute::new(QualifiedName::new("http://example.com/ns/", "Flag2"), "x"),
            RawAttribute::new(QualifiedName::new("urn:unknown", "a"), "b"),
            RawAttribute::new(QualifiedName::new(ns::RDF, "about"), ""),
        ];
        let parsed = registry.parse_attributes(&attributes);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_standard_registry() {
        let registry = standard_registry();
        assert_eq!(registry.prefix(ns::XMP), "xmp");
        assert_eq!(registry.prefix(ns::DC), "dc");
        assert!(registry.contains(ns::ST_FNT));
        assert!(std::ptr::eq(registry, standard_registry()));
    }
}
