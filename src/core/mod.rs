//! XMP Core module
//!
//! This module contains the core functionality for XMP packet processing:
//! names and namespaces, the streaming parser and the property index it
//! produces.

pub mod error;
#[cfg(feature = "serde")]
pub mod export;
pub mod index;
pub mod name;
pub mod namespace;
pub mod parser;
pub mod schemas;

pub use error::{XmpError, XmpResult};
pub use index::{LeafValue, PropertyIndex, ScalarLeaf};
pub use name::{split_phrase, PropertyPath, QualifiedName};
pub use namespace::{standard_registry, Namespace, Registry, UNKNOWN_PREFIX};
pub use parser::XmpParser;
