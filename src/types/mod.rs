//! XMP field and value types
//!
//! A namespace declares a [`FieldType`] per field. Scalar types turn raw text
//! into a [`ScalarValue`]; array types turn collected fragments into an
//! [`ArrayValue`].

pub mod array;
pub mod scalar;
pub mod value;

pub use array::{
    ArrayFieldType, ArrayItem, ArrayValue, Container, Fragment, OpenTag, RawAttribute,
};
pub use scalar::{ScalarFieldType, ScalarValueParser, RENDITION_CLASSES};
pub use value::{Rational, ScalarValue};

/// Declared type of a namespace field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Scalar(ScalarFieldType),
    Array(ArrayFieldType),
}

impl FieldType {
    pub fn as_scalar(&self) -> Option<&ScalarFieldType> {
        match self {
            FieldType::Scalar(kind) => Some(kind),
            FieldType::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<ArrayFieldType> {
        match self {
            FieldType::Array(kind) => Some(*kind),
            FieldType::Scalar(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Scalar(kind) => kind.name(),
            FieldType::Array(kind) => kind.name(),
        }
    }
}

impl From<ScalarFieldType> for FieldType {
    fn from(kind: ScalarFieldType) -> Self {
        FieldType::Scalar(kind)
    }
}

impl From<ArrayFieldType> for FieldType {
    fn from(kind: ArrayFieldType) -> Self {
        FieldType::Array(kind)
    }
}
