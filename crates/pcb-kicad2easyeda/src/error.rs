//! Error types for the conversion pipeline

use thiserror::Error;

/// The source text could not be read as a well-formed footprint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Input contained nothing but whitespace.
    #[error("empty input")]
    Empty,

    /// Unbalanced parentheses or an unterminated string.
    #[error("unexpected end of input (opened at byte {0})")]
    UnexpectedEof(usize),

    /// A closing parenthesis with no matching opener.
    #[error("unexpected ')' at byte {0}")]
    UnexpectedClose(usize),

    /// Lists nested past [`crate::parser::sexpr::MAX_DEPTH`].
    #[error("lists nested too deeply at byte {0}")]
    TooDeep(usize),

    /// Content left over after the root expression.
    #[error("trailing content at byte {0}")]
    TrailingContent(usize),

    /// The root expression is not a footprint.
    #[error("expected footprint or module root element")]
    NotAFootprint,

    /// A recognized construct is missing one of its required fields.
    #[error("{construct}: missing {field}")]
    MissingField {
        construct: &'static str,
        field: &'static str,
    },

    /// A field is present but its value is not usable.
    #[error("{construct}: invalid {field}: {reason}")]
    InvalidField {
        construct: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// A recognized construct references a value outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unmappable {kind} '{value}'")]
pub struct UnmappableValueError {
    /// Which vocabulary the lookup was made against ("layer", "pad type", "pad shape").
    pub kind: &'static str,
    /// The value as it appeared in the source.
    pub value: String,
}

impl UnmappableValueError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Generated output failed its own schema check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("output is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' has the wrong type")]
    WrongType(&'static str),

    #[error("shapeCount is {declared} but shape array has {actual} entries")]
    ShapeCountMismatch { declared: u64, actual: usize },

    #[error("shape {0} has no type discriminator")]
    UntypedShape(usize),

    #[error("shape {index}: field '{field}' must be a number")]
    NonNumericShapeField { index: usize, field: &'static str },

    #[error("through-hole pad {0} has no hole diameter")]
    MissingHole(String),
}

/// Any failure of [`crate::convert`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error(transparent)]
    Unmappable(#[from] UnmappableValueError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Parser failures: either the structure is broken or a value can't be mapped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Unmappable(#[from] UnmappableValueError),
}

impl From<ParseError> for ConversionError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Format(e) => ConversionError::Format(e),
            ParseError::Unmappable(e) => ConversionError::Unmappable(e),
        }
    }
}
