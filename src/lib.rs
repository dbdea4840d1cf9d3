//! # xmpindex
//!
//! A streaming parser for XMP (Extensible Metadata Platform) packets.
//!
//! A packet is read token by token and every property the namespace registry
//! knows is parsed into a typed value and stored in a [`PropertyIndex`] under
//! its rendered path, e.g. `[xmpMM]DerivedFrom.[stRef]instanceID`.
//!
//! ## Example
//!
//! ```
//! use xmpindex::{standard_registry, PropertyIndex, XmpParser};
//!
//! let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
//!   <rdf:Description xmlns:xmp="http://ns.adobe.com/xap/1.0/">
//!     <xmp:Label>draft</xmp:Label>
//!   </rdf:Description>
//! </rdf:RDF>"#;
//!
//! let index = XmpParser::new(standard_registry()).parse_str(xml)?;
//! let label = index.get_phrase("[xmp]Label")?;
//! assert_eq!(label[0].as_scalar().and_then(|v| v.as_str()), Some("draft"));
//!
//! // the standard registry is also used by `FromStr`
//! let same: PropertyIndex = xml.parse()?;
//! assert_eq!(same.count(), 1);
//! # Ok::<(), xmpindex::XmpError>(())
//! ```

pub mod core;
pub mod types;
pub mod utils;

pub use core::{
    standard_registry, LeafValue, Namespace, PropertyIndex, PropertyPath, QualifiedName,
    Registry, ScalarLeaf, XmpError, XmpParser, XmpResult,
};
pub use types::{ArrayFieldType, ArrayValue, FieldType, ScalarFieldType, ScalarValue};
pub use utils::{ByteOrderMark, XmpDateTime};
