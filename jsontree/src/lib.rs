// SPDX-License-Identifier: Apache-2.0

//! A small recursive-descent JSON parser that builds an owned [`Value`] tree.
//!
//! Parsing starts at the first byte of the input and dispatches on it: digits
//! and signs start numbers, `"` starts a string, `[` an array and `{` an
//! object. Arrays and objects recurse through the same dispatcher, sharing one
//! cursor, so every result reports how many bytes it consumed.
//!
//! Containers are best-effort: if a child cannot be parsed, the container is
//! cut short and returned with what it has, and the failure is recorded as a
//! [`Diagnostic`] on the [`Parsed`] result.
//!
//! ```
//! use jsontree::{parse, Value};
//!
//! let parsed = parse(r#"{"hello": 23, "world": [1, 2.5]}"#).unwrap();
//! assert_eq!(parsed.value.get("hello"), Some(&Value::Int(23)));
//! assert!(!parsed.is_partial());
//!
//! let partial = parse("[1, 2, oops]").unwrap();
//! assert_eq!(partial.value, Value::Array(vec![Value::Int(1), Value::Int(2)]));
//! assert!(partial.is_partial());
//! ```
//!
//! Not supported: escape sequences in strings, the `true`/`false`/`null`
//! keywords, and whitespace other than spaces between tokens.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Compile-time configuration validation
mod config_check;

mod depth;
pub use depth::{DepthCounter, DEFAULT_MAX_DEPTH};

mod slice_cursor;

mod parse_error;
pub use parse_error::{Diagnostic, ParseError};

mod value;
pub use value::{Int, Map, TypeMismatch, Value, ValueKind};

mod number;

mod pretty;
pub use pretty::Pretty;

mod tree_parser;
pub use tree_parser::{parse, parse_complete, parse_slice, Parsed, TreeParser};
