//! Scalar field types
//!
//! Each [`ScalarFieldType`] hands out a [`ScalarValueParser`] for a raw string;
//! the parser applies that type's grammar.

use crate::core::error::{XmpError, XmpResult};
use crate::types::value::{Rational, ScalarValue};
use crate::utils::datetime::XmpDateTime;

/// Allowed values of `xmpMM:RenditionClass`
pub const RENDITION_CLASSES: &[&str] = &[
    "default",
    "draft",
    "low-res",
    "proof",
    "screen",
    "thumbnail",
];

/// Declared type of a scalar field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarFieldType {
    Text,
    Date,
    Boolean,
    Integer,
    Real,
    Rational,
    Guid,
    Uri,
    Url,
    AgentName,
    /// Suggested values; anything else is accepted too
    OpenChoice(Vec<String>),
    /// The value must be one of these
    ClosedChoice(Vec<String>),
    /// Single `xml:lang`-qualified text value
    LanguageAlternative,
    Locale,
    MimeType,
    ProperName,
    RenditionClass,
    Part,
    FrameCount,
    FrameRate,
}

impl ScalarFieldType {
    /// Open choice over the given suggestions
    pub fn open_choice(choices: &[&str]) -> Self {
        ScalarFieldType::OpenChoice(choices.iter().map(|c| c.to_string()).collect())
    }

    /// Closed choice over the given candidates
    pub fn closed_choice(choices: &[&str]) -> Self {
        ScalarFieldType::ClosedChoice(choices.iter().map(|c| c.to_string()).collect())
    }

    /// Type name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ScalarFieldType::Text => "Text",
            ScalarFieldType::Date => "Date",
            ScalarFieldType::Boolean => "Boolean",
            ScalarFieldType::Integer => "Integer",
            ScalarFieldType::Real => "Real",
            ScalarFieldType::Rational => "Rational",
            ScalarFieldType::Guid => "GUID",
            ScalarFieldType::Uri => "URI",
            ScalarFieldType::Url => "URL",
            ScalarFieldType::AgentName => "AgentName",
            ScalarFieldType::OpenChoice(_) => "OpenChoice",
            ScalarFieldType::ClosedChoice(_) => "ClosedChoice",
            ScalarFieldType::LanguageAlternative => "LanguageAlternative",
            ScalarFieldType::Locale => "Locale",
            ScalarFieldType::MimeType => "MIMEType",
            ScalarFieldType::ProperName => "ProperName",
            ScalarFieldType::RenditionClass => "RenditionClass",
            ScalarFieldType::Part => "Part",
            ScalarFieldType::FrameCount => "FrameCount",
            ScalarFieldType::FrameRate => "FrameRate",
        }
    }

    /// Bind a raw string to this type's grammar
    pub fn parser<'a>(&'a self, raw: &'a str) -> ScalarValueParser<'a> {
        ScalarValueParser { kind: self, raw }
    }

    /// Shorthand for `parser(raw).parse()`
    pub fn parse(&self, raw: &str) -> XmpResult<ScalarValue> {
        self.parser(raw).parse()
    }
}

/// A raw string bound to the scalar type that will interpret it
#[derive(Debug, Clone, Copy)]
pub struct ScalarValueParser<'a> {
    kind: &'a ScalarFieldType,
    raw: &'a str,
}

impl<'a> ScalarValueParser<'a> {
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    fn invalid(&self) -> XmpError {
        XmpError::value_not_valid(self.kind.name(), self.raw)
    }

    fn one_of(&self, choices: impl IntoIterator<Item = &'a str>) -> XmpResult<ScalarValue> {
        if choices.into_iter().any(|c| c == self.raw) {
            Ok(ScalarValue::Text(self.raw.to_string()))
        } else {
            Err(self.invalid())
        }
    }

    /// Parse the raw string, failing with `ValueNotValid` on a grammar mismatch
    pub fn parse(&self) -> XmpResult<ScalarValue> {
        match self.kind {
            ScalarFieldType::Boolean => match self.raw {
                "True" => Ok(ScalarValue::Boolean(true)),
                "False" => Ok(ScalarValue::Boolean(false)),
                _ => Err(self.invalid()),
            },
            ScalarFieldType::Integer => self
                .raw
                .trim()
                .parse()
                .map(ScalarValue::Integer)
                .map_err(|_| self.invalid()),
            ScalarFieldType::Real => self
                .raw
                .trim()
                .parse()
                .map(ScalarValue::Real)
                .map_err(|_| self.invalid()),
            ScalarFieldType::Rational => self
                .raw
                .parse::<Rational>()
                .map(ScalarValue::Rational)
                .map_err(|_| self.invalid()),
            ScalarFieldType::Date => XmpDateTime::parse(self.raw)
                .map(ScalarValue::Date)
                .map_err(|_| self.invalid()),
            ScalarFieldType::ClosedChoice(choices) => {
                self.one_of(choices.iter().map(String::as_str))
            }
            ScalarFieldType::RenditionClass => self.one_of(RENDITION_CLASSES.iter().copied()),
            ScalarFieldType::OpenChoice(_)
            | ScalarFieldType::Text
            | ScalarFieldType::Guid
            | ScalarFieldType::Uri
            | ScalarFieldType::Url
            | ScalarFieldType::AgentName
            | ScalarFieldType::LanguageAlternative
            | ScalarFieldType::Locale
            | ScalarFieldType::MimeType
            | ScalarFieldType::ProperName
            | ScalarFieldType::Part
            | ScalarFieldType::FrameCount
            | ScalarFieldType::FrameRate => Ok(ScalarValue::Text(self.raw.to_string())),
        }
    }
}
