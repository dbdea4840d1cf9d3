//! Parsed scalar values
//!
//! This module defines the typed values a scalar field parses into.

use crate::core::error::{XmpError, XmpResult};
use crate::utils::datetime::XmpDateTime;
use std::fmt;
use std::str::FromStr;

/// A `N/D` rational number with integral parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Value as a float; `None` when the denominator is zero
    pub fn to_f64(&self) -> Option<f64> {
        (self.denominator != 0).then(|| self.numerator as f64 / self.denominator as f64)
    }
}

impl FromStr for Rational {
    type Err = XmpError;

    fn from_str(s: &str) -> XmpResult<Self> {
        let invalid = || XmpError::value_not_valid("Rational", s);
        let (n, d) = s.split_once('/').ok_or_else(invalid)?;
        let numerator = n.trim().parse().map_err(|_| invalid())?;
        let denominator = d.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(numerator, denominator))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Typed value of a scalar field
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Any pass-through string kind (text, URI, GUID, choice, ...)
    Text(String),
    /// Date/time value
    Date(XmpDateTime),
    /// `True` / `False`
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real value
    Real(f64),
    /// `N/D` value
    Rational(Rational),
}

impl ScalarValue {
    /// Get the value as a string, if it is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            ScalarValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&XmpDateTime> {
        match self {
            ScalarValue::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            ScalarValue::Rational(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Text(s) => f.write_str(s),
            ScalarValue::Date(dt) => write!(f, "{}", dt),
            ScalarValue::Boolean(true) => f.write_str("True"),
            ScalarValue::Boolean(false) => f.write_str("False"),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Real(r) => write!(f, "{}", r),
            ScalarValue::Rational(r) => write!(f, "{}", r),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        match self {
            ScalarValue::Text(s) => serializer.serialize_str(s),
            ScalarValue::Boolean(b) => serializer.serialize_bool(*b),
            ScalarValue::Integer(i) => serializer.serialize_i64(*i),
            ScalarValue::Real(r) => serializer.serialize_f64(*r),
            ScalarValue::Date(_) | ScalarValue::Rational(_) => {
                serializer.collect_str(self)
            }
        }
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}
