// SPDX-License-Identifier: Apache-2.0

use crate::slice_cursor;
use crate::value::{TypeMismatch, ValueKind};

/// Errors that can occur during JSON parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The parser was handed a zero-length input.
    EmptyInput,
    /// The leading byte does not start any construct the parser knows about.
    /// This includes whitespace and the keyword literals `true`, `false`, `null`.
    UnrecognizedConstruct(u8),
    /// A numeric-looking token that is neither a valid integer nor a finite float.
    InvalidNumber,
    /// A string literal without a closing quote.
    UnterminatedString,
    /// An array element could not be parsed; the array was cut short.
    MalformedArrayElement,
    /// An object key or value could not be parsed; the object was cut short.
    MalformedObjectEntry,
    /// An object key parsed as something other than a string.
    InvalidObjectKey(ValueKind),
    /// A string literal was not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// Nesting went deeper than the configured limit.
    DepthLimitExceeded,
    /// Input ended before the closing `]` of an array.
    UnclosedArray,
    /// Input ended before the closing `}` of an object.
    UnclosedObject,
    /// A complete value was parsed but input remains after it.
    TrailingData { consumed: usize },
    /// The parser entered an unexpected internal state.
    UnexpectedState(&'static str),
}

impl ParseError {
    /// Whether an enclosing array or object may absorb this failure and keep
    /// the elements it already has. Depth and internal-state failures always
    /// abort the whole parse.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ParseError::DepthLimitExceeded | ParseError::UnexpectedState(_)
        )
    }
}

impl From<slice_cursor::Error> for ParseError {
    fn from(err: slice_cursor::Error) -> Self {
        match err {
            slice_cursor::Error::ReachedEnd => {
                ParseError::UnexpectedState("Cursor moved past the end of input")
            }
            slice_cursor::Error::InvalidSliceBounds => {
                ParseError::UnexpectedState("Invalid slice bounds in cursor")
            }
        }
    }
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

/// Only object keys are extracted by variant during parsing, so a mismatch
/// there is always a bad key.
impl From<TypeMismatch> for ParseError {
    fn from(err: TypeMismatch) -> Self {
        ParseError::InvalidObjectKey(err.found)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::EmptyInput => f.write_str("empty input"),
            ParseError::UnrecognizedConstruct(byte) if byte.is_ascii_graphic() => {
                write!(f, "unrecognized construct starting with '{}'", *byte as char)
            }
            ParseError::UnrecognizedConstruct(byte) => {
                write!(f, "unrecognized construct starting with byte 0x{byte:02x}")
            }
            ParseError::InvalidNumber => f.write_str("invalid number"),
            ParseError::UnterminatedString => f.write_str("unterminated string"),
            ParseError::MalformedArrayElement => f.write_str("invalid json array"),
            ParseError::MalformedObjectEntry => f.write_str("invalid json object"),
            ParseError::InvalidObjectKey(kind) => {
                write!(f, "object key must be a string, got {kind}")
            }
            ParseError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {e}"),
            ParseError::DepthLimitExceeded => f.write_str("nesting depth limit exceeded"),
            ParseError::UnclosedArray => f.write_str("array is missing its closing ']'"),
            ParseError::UnclosedObject => f.write_str("object is missing its closing '}'"),
            ParseError::TrailingData { consumed } => {
                write!(f, "trailing data after byte {consumed}")
            }
            ParseError::UnexpectedState(context) => write!(f, "unexpected state: {context}"),
        }
    }
}

/// A failure that an array or object absorbed instead of failing the parse.
///
/// The container it belongs to is returned with whatever it held when the
/// failure happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// What went wrong at the container level, e.g. `MalformedArrayElement`.
    pub error: ParseError,
    /// The child failure that triggered it, if any.
    pub cause: Option<ParseError>,
    /// Byte offset into the whole input where the failing child starts.
    pub offset: usize,
}

impl Diagnostic {
    pub(crate) fn new(error: ParseError, cause: Option<ParseError>, offset: usize) -> Self {
        Self {
            error,
            cause,
            offset,
        }
    }
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at byte {}", self.error, self.offset)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}
