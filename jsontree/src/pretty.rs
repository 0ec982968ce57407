// SPDX-License-Identifier: Apache-2.0

//! Debug printing for value trees.
//!
//! This is not a serializer: strings are printed verbatim between quotes, so
//! the output is not guaranteed to parse back into the same tree.

use core::fmt::{self, Display, Formatter, Write};

use crate::value::Value;

const INDENT: &str = "  ";

/// Multi-line, indented rendering of a [`Value`], returned by [`Value::pretty`].
pub struct Pretty<'v>(&'v Value);

impl Value {
    /// Returns an adapter that displays this value over several indented lines.
    ///
    /// # Example
    /// ```
    /// use jsontree::parse;
    /// let value = parse("[1, [2]]").unwrap().value;
    /// assert_eq!(value.pretty().to_string(), "[\n  1,\n  [\n    2\n  ]\n]");
    /// ```
    pub fn pretty(&self) -> Pretty<'_> {
        Pretty(self)
    }
}

fn write_indent(f: &mut Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str(INDENT)?;
    }
    Ok(())
}

/// Scalars print the same in both layouts. Returns `false` for containers.
fn write_scalar(f: &mut Formatter<'_>, value: &Value) -> Result<bool, fmt::Error> {
    match value {
        Value::Null => f.write_str("null")?,
        Value::Bool(b) => write!(f, "{b}")?,
        Value::Int(i) => write!(f, "{i}")?,
        // Debug formatting keeps the fraction, so 250.0 never reads as an Int
        Value::Double(d) => write!(f, "{d:?}")?,
        Value::String(s) => {
            f.write_char('"')?;
            f.write_str(s)?;
            f.write_char('"')?;
        }
        Value::Array(_) | Value::Object(_) => return Ok(false),
    }
    Ok(true)
}

fn write_compact(f: &mut Formatter<'_>, value: &Value) -> fmt::Result {
    if write_scalar(f, value)? {
        return Ok(());
    }
    match value {
        Value::Array(elements) => {
            f.write_char('[')?;
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_compact(f, element)?;
            }
            f.write_char(']')
        }
        Value::Object(entries) => {
            f.write_char('{')?;
            for (i, (key, entry)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "\"{key}\": ")?;
                write_compact(f, entry)?;
            }
            f.write_char('}')
        }
        _ => Ok(()),
    }
}

fn write_pretty(f: &mut Formatter<'_>, value: &Value, level: usize) -> fmt::Result {
    if write_scalar(f, value)? {
        return Ok(());
    }
    match value {
        Value::Array(elements) if elements.is_empty() => f.write_str("[]"),
        Value::Object(entries) if entries.is_empty() => f.write_str("{}"),
        Value::Array(elements) => {
            f.write_str("[\n")?;
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    f.write_str(",\n")?;
                }
                write_indent(f, level + 1)?;
                write_pretty(f, element, level + 1)?;
            }
            f.write_char('\n')?;
            write_indent(f, level)?;
            f.write_char(']')
        }
        Value::Object(entries) => {
            f.write_str("{\n")?;
            for (i, (key, entry)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(",\n")?;
                }
                write_indent(f, level + 1)?;
                write!(f, "\"{key}\": ")?;
                write_pretty(f, entry, level + 1)?;
            }
            f.write_char('\n')?;
            write_indent(f, level)?;
            f.write_char('}')
        }
        _ => Ok(()),
    }
}

/// Single-line debug rendering, e.g. `{"a": [1, 2.5, "x"]}`.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_compact(f, self)
    }
}

impl Display for Pretty<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_pretty(f, self.0, 0)
    }
}
