// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, trace, warn};

use crate::depth::{DepthCounter, NestingDepth};
use crate::number::parse_number_prefix;
use crate::parse_error::{Diagnostic, ParseError};
use crate::slice_cursor::SliceCursor;
use crate::value::{Map, Value};

/// The outcome of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// The value recognized at the start of the input.
    pub value: Value,
    /// How many leading bytes of the input belong to `value`. Always greater
    /// than zero and never more than the input length.
    pub consumed: usize,
    /// Failures absorbed by arrays and objects, in the order they happened.
    /// Empty unless some container in `value` was cut short.
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    /// True when some container in the tree holds fewer children than the
    /// input implies.
    pub fn is_partial(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Drops the bookkeeping and keeps only the tree.
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// How an array or object loop came to an end.
enum Termination {
    /// Found the closing delimiter.
    Closed,
    /// Ran out of input first.
    Exhausted,
    /// Gave up on a malformed child.
    Malformed,
}

/// A recursive-descent parser that builds a [`Value`] tree from a slice.
///
/// Generic over the depth counter type. Nesting is limited to
/// [`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH) levels, or fewer when the
/// counter cannot count that high; the default `u8` allows 255.
pub struct TreeParser<'a, D: DepthCounter = u8> {
    cursor: SliceCursor<'a>,
    nesting: NestingDepth<D>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TreeParser<'a, u8> {
    /// Creates a new parser for the given JSON input.
    ///
    /// # Example
    /// ```
    /// use jsontree::{TreeParser, Value};
    /// let parsed = TreeParser::new("[1, 2]").parse().unwrap();
    /// assert_eq!(parsed.value, Value::Array(vec![Value::Int(1), Value::Int(2)]));
    /// ```
    pub fn new(input: &'a str) -> Self {
        Self::new_from_slice(input.as_bytes())
    }

    /// Creates a new parser from a byte slice. String payloads must still be
    /// valid UTF-8.
    pub fn new_from_slice(input: &'a [u8]) -> Self {
        Self::with_config_from_slice(input)
    }
}

impl<'a, D: DepthCounter> TreeParser<'a, D> {
    /// Creates a parser with a custom depth counter type.
    ///
    /// # Example
    /// ```
    /// # use jsontree::TreeParser;
    /// let parser = TreeParser::<u16>::with_config("[[[]]]");
    /// ```
    pub fn with_config(input: &'a str) -> Self {
        Self::with_config_from_slice(input.as_bytes())
    }

    pub fn with_config_from_slice(input: &'a [u8]) -> Self {
        Self {
            cursor: SliceCursor::new(input),
            nesting: NestingDepth::with_default_limit(),
            diagnostics: Vec::new(),
        }
    }

    /// Replaces the default nesting ceiling. Each level costs stack, so large
    /// limits are only safe on threads with a matching stack size.
    pub fn with_max_depth(mut self, limit: D) -> Self {
        self.nesting = NestingDepth::new(limit);
        self
    }

    /// Parses one value from the start of the input.
    ///
    /// Anything after that value is left alone; compare
    /// [`Parsed::consumed`] with the input length to detect trailing data.
    pub fn parse(mut self) -> Result<Parsed, ParseError> {
        let value = self.parse_value()?;
        let consumed = self.cursor.current_pos();
        debug!(
            "parsed {} of {} bytes, {} diagnostic(s)",
            consumed,
            self.cursor.data_len(),
            self.diagnostics.len()
        );
        Ok(Parsed {
            value,
            consumed,
            diagnostics: self.diagnostics,
        })
    }

    /// Classifies the construct under the cursor by its leading byte and
    /// hands it to the matching sub-parser. Every nested value goes through
    /// here.
    ///
    /// A recoverable failure leaves the cursor where the construct started.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let Some(lead) = self.cursor.peek() else {
            return Err(ParseError::EmptyInput);
        };
        trace!(
            "dispatch {:?} at {}",
            lead as char,
            self.cursor.current_pos()
        );
        match lead {
            b'0'..=b'9' | b'+' | b'-' => self.parse_number(),
            b'"' => self.parse_string(),
            b'[' => self.parse_array(),
            b'{' => self.parse_object(),
            other => Err(ParseError::UnrecognizedConstruct(other)),
        }
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let (value, len) = parse_number_prefix(self.cursor.remaining())?;
        self.cursor.advance(len)?;
        Ok(value)
    }

    /// Takes everything up to the next `"` verbatim. Escapes are not
    /// interpreted, so `\"` ends the literal.
    fn parse_string(&mut self) -> Result<Value, ParseError> {
        let closing = self
            .cursor
            .find_from(1, b'"')
            .ok_or(ParseError::UnterminatedString)?;
        let start = self.cursor.current_pos();
        let content = self.cursor.slice(start + 1, start + closing)?;
        let text = core::str::from_utf8(content)?;
        self.cursor.advance(closing + 1)?;
        Ok(Value::String(String::from(text)))
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.nesting.enter().inspect_err(|_| self.log_depth_rejection())?;
        self.cursor.consume_byte()?;
        let mut elements = Vec::new();

        let termination = loop {
            let Some(byte) = self.cursor.peek() else {
                break Termination::Exhausted;
            };
            if byte == b']' {
                self.cursor.consume_byte()?;
                break Termination::Closed;
            }
            let offset = self.cursor.current_pos();
            match self.parse_value() {
                Ok(element) => elements.push(element),
                Err(e) if e.is_recoverable() => {
                    warn!("invalid json array element at {offset}: {e}");
                    self.record(ParseError::MalformedArrayElement, Some(e), offset);
                    break Termination::Malformed;
                }
                Err(e) => return Err(e),
            }
            self.skip_separators();
        };

        if let Termination::Exhausted = termination {
            let offset = self.cursor.current_pos();
            warn!("json array not closed before end of input at {offset}");
            self.record(ParseError::UnclosedArray, None, offset);
        }
        self.nesting.exit();
        Ok(Value::Array(elements))
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.nesting.enter().inspect_err(|_| self.log_depth_rejection())?;
        self.cursor.consume_byte()?;
        let mut entries = Map::new();

        let termination = loop {
            let Some(byte) = self.cursor.peek() else {
                break Termination::Exhausted;
            };
            if byte == b'}' {
                self.cursor.consume_byte()?;
                break Termination::Closed;
            }

            let key_offset = self.cursor.current_pos();
            let key = match self.parse_key() {
                Ok(key) => key,
                Err(e) if e.is_recoverable() => {
                    self.malformed_entry(e, key_offset);
                    break Termination::Malformed;
                }
                Err(e) => return Err(e),
            };

            self.cursor.skip_while(|b| b == b' ');
            if self.cursor.peek() == Some(b':') {
                self.cursor.consume_byte()?;
            }
            self.cursor.skip_while(|b| b == b' ');

            let value_offset = self.cursor.current_pos();
            match self.parse_value() {
                Ok(value) => {
                    entries.insert(key, value);
                }
                Err(e) if e.is_recoverable() => {
                    self.malformed_entry(e, value_offset);
                    break Termination::Malformed;
                }
                Err(e) => return Err(e),
            }
            self.skip_separators();
        };

        if let Termination::Exhausted = termination {
            let offset = self.cursor.current_pos();
            warn!("json object not closed before end of input at {offset}");
            self.record(ParseError::UnclosedObject, None, offset);
        }
        self.nesting.exit();
        Ok(Value::Object(entries))
    }

    /// Keys go through the dispatcher like any value and must come out as
    /// strings. A key of any other kind is given back to the input.
    fn parse_key(&mut self) -> Result<String, ParseError> {
        let start = self.cursor.current_pos();
        let key = self.parse_value()?;
        match key.into_string() {
            Ok(key) => Ok(key),
            Err(mismatch) => {
                self.cursor.rewind_to(start)?;
                Err(mismatch.into())
            }
        }
    }

    fn malformed_entry(&mut self, cause: ParseError, offset: usize) {
        warn!("invalid json object entry at {offset}: {cause}");
        self.record(ParseError::MalformedObjectEntry, Some(cause), offset);
    }

    /// Skips the run of `,` and ` ` between elements or entries.
    fn skip_separators(&mut self) {
        self.cursor.skip_while(|b| b == b',' || b == b' ');
    }

    fn record(&mut self, error: ParseError, cause: Option<ParseError>, offset: usize) {
        self.diagnostics.push(Diagnostic::new(error, cause, offset));
    }

    fn log_depth_rejection(&self) {
        debug!(
            "nesting past depth {:?} (limit {:?}) at {}",
            self.nesting.current(),
            self.nesting.limit(),
            self.cursor.current_pos()
        );
    }
}

/// Parses one value from the start of `text`.
///
/// # Example
/// ```
/// use jsontree::{parse, Value};
/// let parsed = parse("-2.5e2").unwrap();
/// assert_eq!(parsed.value, Value::Double(-250.0));
/// assert_eq!(parsed.consumed, 6);
/// ```
pub fn parse(text: &str) -> Result<Parsed, ParseError> {
    TreeParser::new(text).parse()
}

/// Like [`parse`], for byte input.
pub fn parse_slice(bytes: &[u8]) -> Result<Parsed, ParseError> {
    TreeParser::new_from_slice(bytes).parse()
}

/// Parses `text` as a whole document.
///
/// Fails with the first absorbed failure if any container was cut short, and
/// with [`ParseError::TrailingData`] if input remains after the value.
///
/// # Example
/// ```
/// use jsontree::{parse_complete, ParseError};
/// assert!(parse_complete(r#"{"a": [1, 2]}"#).is_ok());
/// assert_eq!(parse_complete("12 13"), Err(ParseError::TrailingData { consumed: 2 }));
/// ```
pub fn parse_complete(text: &str) -> Result<Value, ParseError> {
    let Parsed {
        value,
        consumed,
        diagnostics,
    } = parse(text)?;
    if let Some(first) = diagnostics.into_iter().next() {
        return Err(first.error);
    }
    if consumed < text.len() {
        return Err(ParseError::TrailingData { consumed });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use test_log::test;

    fn object(entries: &[(&str, Value)]) -> Value {
        Value::Object(
            entries
                .iter()
                .map(|(k, v)| (String::from(*k), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn parse_numbers() {
        let parsed = parse("-7").unwrap();
        assert_eq!(parsed.value, Value::Int(-7));
        assert_eq!(parsed.consumed, 2);

        let parsed = parse("3.14").unwrap();
        assert_eq!(parsed.value, Value::Double(3.14));
        assert_eq!(parsed.consumed, 4);

        let parsed = parse("-2.5e2").unwrap();
        assert_eq!(parsed.value, Value::Double(-250.0));
        assert_eq!(parsed.consumed, 6);
        assert!(!parsed.is_partial());
    }

    #[test]
    fn parse_number_stops_at_token_end() {
        let parsed = parse("12abc").unwrap();
        assert_eq!(parsed.value, Value::Int(12));
        assert_eq!(parsed.consumed, 2);
    }

    #[test]
    fn parse_strings() {
        let parsed = parse("\"hello\"").unwrap();
        assert_eq!(parsed.value, Value::from("hello"));
        assert_eq!(parsed.consumed, 7);

        let parsed = parse("\"\"").unwrap();
        assert_eq!(parsed.value, Value::from(""));
        assert_eq!(parsed.consumed, 2);

        // A raw newline is just another byte
        let parsed = parse("\"Hello\nWorld!\"").unwrap();
        assert_eq!(parsed.value, Value::from("Hello\nWorld!"));
    }

    #[test]
    fn parse_string_keeps_backslashes() {
        let parsed = parse(r#""a\"b""#).unwrap();
        assert_eq!(parsed.value, Value::from("a\\"));
        assert_eq!(parsed.consumed, 4);
    }

    #[test]
    fn parse_string_unterminated() {
        assert_eq!(parse("\"abc"), Err(ParseError::UnterminatedString));
        assert_eq!(parse("\""), Err(ParseError::UnterminatedString));
    }

    #[test]
    fn parse_string_invalid_utf8() {
        let mut input = *b"\"a?\"";
        input[2] = 0xff;
        assert!(matches!(
            parse_slice(&input),
            Err(ParseError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn parse_arrays() {
        let parsed = parse("[1, 2, 3]").unwrap();
        assert_eq!(
            parsed.value,
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(parsed.consumed, 9);

        let input = "[1, [2, 3, 4], 5]";
        let parsed = parse(input).unwrap();
        assert_eq!(
            parsed.value,
            Value::Array(vec![
                Value::Int(1),
                Value::Array(vec![Value::Int(2), Value::Int(3), Value::Int(4)]),
                Value::Int(5),
            ])
        );
        assert_eq!(parsed.consumed, input.len());

        let parsed = parse("[]").unwrap();
        assert_eq!(parsed.value, Value::Array(vec![]));
        assert_eq!(parsed.consumed, 2);
    }

    #[test]
    fn parse_array_with_bracket_in_string() {
        let input = r#"[123, 1.23, "hello]world", -5]"#;
        let parsed = parse(input).unwrap();
        assert_eq!(
            parsed.value,
            Value::Array(vec![
                Value::Int(123),
                Value::Double(1.23),
                Value::from("hello]world"),
                Value::Int(-5),
            ])
        );
        assert_eq!(parsed.consumed, input.len());
    }

    #[test]
    fn parse_array_stops_after_closing_bracket() {
        let parsed = parse("[1],[2]").unwrap();
        assert_eq!(parsed.value, Value::Array(vec![Value::Int(1)]));
        assert_eq!(parsed.consumed, 3);
    }

    #[test]
    fn parse_array_malformed_element() {
        let parsed = parse("[1, 2, x, 4]").unwrap();
        assert_eq!(
            parsed.value,
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(parsed.consumed, 7);
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(
                ParseError::MalformedArrayElement,
                Some(ParseError::UnrecognizedConstruct(b'x')),
                7,
            )]
        );
        assert!(parsed.is_partial());
    }

    #[test]
    fn parse_array_unclosed() {
        let parsed = parse("[1, 2").unwrap();
        assert_eq!(
            parsed.value,
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(parsed.consumed, 5);
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(ParseError::UnclosedArray, None, 5)]
        );
    }

    #[test]
    fn parse_nested_partial_keeps_outer_going() {
        let parsed = parse("[[1, true], 2]").unwrap();
        assert_eq!(
            parsed.value,
            Value::Array(vec![Value::Array(vec![Value::Int(1)])])
        );
        // The inner array stopped at 't', which the outer array cannot parse either
        assert_eq!(parsed.diagnostics.len(), 2);
        assert_eq!(parsed.diagnostics[0].offset, 5);
        assert_eq!(parsed.diagnostics[1].offset, 5);
        assert_eq!(
            parsed.diagnostics[1].error,
            ParseError::MalformedArrayElement
        );
    }

    #[test]
    fn parse_objects() {
        let parsed = parse(r#"{"hello": 23, "world": 24}"#).unwrap();
        assert_eq!(
            parsed.value,
            object(&[("hello", Value::Int(23)), ("world", Value::Int(24))])
        );
        assert_eq!(parsed.consumed, 26);
        assert!(!parsed.is_partial());

        let parsed = parse(r#"{"hello": 23, "world": {"a": 1, "b": 2}}"#).unwrap();
        assert_eq!(
            parsed.value.get("world"),
            Some(&object(&[("a", Value::Int(1)), ("b", Value::Int(2))]))
        );

        let parsed = parse("{}").unwrap();
        assert_eq!(parsed.value, Value::Object(Map::new()));
    }

    #[test]
    fn parse_object_separator_is_optional() {
        let parsed = parse(r#"{"a" 1,"b":2}"#).unwrap();
        assert_eq!(
            parsed.value,
            object(&[("a", Value::Int(1)), ("b", Value::Int(2))])
        );
    }

    #[test]
    fn parse_object_duplicate_key_last_wins() {
        let parsed = parse(r#"{"k": 1, "k": 2}"#).unwrap();
        assert_eq!(parsed.value, object(&[("k", Value::Int(2))]));
    }

    #[test]
    fn parse_object_non_string_key() {
        let parsed = parse(r#"{"a": 1, 2: 3}"#).unwrap();
        assert_eq!(parsed.value, object(&[("a", Value::Int(1))]));
        // The rejected key is not counted as consumed
        assert_eq!(parsed.consumed, 9);
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(
                ParseError::MalformedObjectEntry,
                Some(ParseError::InvalidObjectKey(crate::ValueKind::Int)),
                9,
            )]
        );
    }

    #[test]
    fn parse_object_container_key_is_given_back() {
        let parsed = parse(r#"{[1, 2]: 3}"#).unwrap();
        assert_eq!(parsed.value, Value::Object(Map::new()));
        assert_eq!(parsed.consumed, 1);
        assert_eq!(parsed.diagnostics[0].offset, 1);
    }

    #[test]
    fn parse_object_missing_value() {
        let parsed = parse(r#"{"a": }"#).unwrap();
        assert_eq!(parsed.value, Value::Object(Map::new()));
        assert_eq!(parsed.consumed, 6);
        assert_eq!(
            parsed.diagnostics[0].cause,
            Some(ParseError::UnrecognizedConstruct(b'}'))
        );

        let parsed = parse(r#"{"a":"#).unwrap();
        assert_eq!(parsed.diagnostics[0].cause, Some(ParseError::EmptyInput));
    }

    #[test]
    fn parse_object_unclosed() {
        let parsed = parse(r#"{"a": 1"#).unwrap();
        assert_eq!(parsed.value, object(&[("a", Value::Int(1))]));
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(ParseError::UnclosedObject, None, 7)]
        );
    }

    #[test]
    fn parse_empty_and_unrecognized_are_distinct() {
        assert_eq!(parse(""), Err(ParseError::EmptyInput));
        assert_eq!(parse("xyz"), Err(ParseError::UnrecognizedConstruct(b'x')));
        assert_eq!(parse(" 1"), Err(ParseError::UnrecognizedConstruct(b' ')));
        assert_eq!(parse("null"), Err(ParseError::UnrecognizedConstruct(b'n')));
        assert_eq!(parse("-"), Err(ParseError::InvalidNumber));
    }

    #[test]
    fn parse_respects_max_depth() {
        let result = TreeParser::new("[[[1]]]").with_max_depth(2).parse();
        assert_eq!(result, Err(ParseError::DepthLimitExceeded));

        let parsed = TreeParser::new("[[[1]]]").with_max_depth(3).parse().unwrap();
        assert_eq!(parsed.consumed, 7);
    }

    #[test]
    fn parse_complete_rules() {
        assert_eq!(
            parse_complete("[1, 2]"),
            Ok(Value::Array(vec![Value::Int(1), Value::Int(2)]))
        );
        assert_eq!(
            parse_complete("[1, x]"),
            Err(ParseError::MalformedArrayElement)
        );
        assert_eq!(parse_complete("[1"), Err(ParseError::UnclosedArray));
        assert_eq!(
            parse_complete("\"a\" "),
            Err(ParseError::TrailingData { consumed: 3 })
        );
        assert_eq!(parse_complete(""), Err(ParseError::EmptyInput));
    }
}
