//! Error types for XMP parsing
//!
//! Errors fall in two groups. Value-level problems (an unknown namespace, a
//! field missing from its table, text that does not fit the field grammar)
//! are recoverable: the parser logs them and drops the single value.
//! Structural problems abort the parse.

use thiserror::Error;

/// Error types for XMP operations
#[derive(Debug, Error)]
pub enum XmpError {
    /// Namespace URI is not registered
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    /// Namespace is registered but has no such field
    #[error("Field not found: [{namespace}]{field}")]
    FieldNotFound { namespace: String, field: String },

    /// No property is stored at the queried path
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// Raw text does not conform to the field grammar
    #[error("Value not valid for {kind}: [{raw}]")]
    ValueNotValid { kind: String, raw: String },

    /// Namespace URI registered twice
    #[error("Namespace already registered: {0}")]
    DuplicateNamespace(String),

    /// Anchor tag mismatch inside an array container
    #[error("Expected [{expected}] tag, found [{found}]")]
    UnexpectedTag { expected: String, found: String },

    /// Unbalanced RDF structure
    #[error("Structure error: {0}")]
    Structure(String),

    /// Malformed xpacket processing instruction
    #[error("Packet error: {0}")]
    Packet(String),

    /// Path key already holds the other kind of entry
    #[error("Path conflict: {0}")]
    PathConflict(String),

    /// XML tokenizer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl XmpError {
    /// Build a `ValueNotValid` error for a field kind and raw text
    pub fn value_not_valid(kind: impl Into<String>, raw: impl Into<String>) -> Self {
        XmpError::ValueNotValid {
            kind: kind.into(),
            raw: raw.into(),
        }
    }

    /// Whether the parser may log this error and continue with the document
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            XmpError::NamespaceNotFound(_)
                | XmpError::FieldNotFound { .. }
                | XmpError::PropertyNotFound(_)
                | XmpError::ValueNotValid { .. }
                | XmpError::PathConflict(_)
        )
    }
}

impl From<quick_xml::events::attributes::AttrError> for XmpError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmpError::Xml(quick_xml::Error::InvalidAttr(err))
    }
}

/// Result type alias for XMP operations
pub type XmpResult<T> = Result<T, XmpError>;
