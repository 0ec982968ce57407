// SPDX-License-Identifier: Apache-2.0

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

// Type alias for the configured integer type
#[cfg(all(feature = "int32", not(feature = "int64")))]
pub type Int = i32;
#[cfg(feature = "int64")]
pub type Int = i64;

/// Map type backing [`Value::Object`]. Callers should not rely on its
/// iteration order.
pub type Map = BTreeMap<String, Value>;

/// A parsed JSON value.
///
/// Containers own their children outright, so a tree is always acyclic and
/// dropping the root drops everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No payload.
    #[default]
    Null,
    /// A boolean. The parser never produces this variant since keyword
    /// literals are not recognized; it exists for values built by hand.
    Bool(bool),
    /// A number whose whole token parsed as an integer.
    Int(Int),
    /// A number with a fraction or exponent, or an integer too wide for [`Int`].
    Double(f64),
    /// The verbatim contents of a quoted literal.
    String(String),
    /// Elements in input order.
    Array(Vec<Value>),
    /// Entries keyed by string; the last of any duplicate keys wins.
    Object(Map),
}

/// Which variant a [`Value`] is, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Array,
    Object,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Returned when a typed payload is requested from the wrong variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

impl core::fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    fn mismatch(&self, expected: ValueKind) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch(ValueKind::Bool)),
        }
    }

    pub fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(other.mismatch(ValueKind::Int)),
        }
    }

    /// Strictly the `Double` variant; integers are not widened.
    pub fn as_double(&self) -> Result<f64, TypeMismatch> {
        match self {
            Value::Double(d) => Ok(*d),
            other => Err(other.mismatch(ValueKind::Double)),
        }
    }

    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], TypeMismatch> {
        match self {
            Value::Array(elements) => Ok(elements),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&Map, TypeMismatch> {
        match self {
            Value::Object(entries) => Ok(entries),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    pub fn into_string(self) -> Result<String, TypeMismatch> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn into_array(self) -> Result<Vec<Value>, TypeMismatch> {
        match self {
            Value::Array(elements) => Ok(elements),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }

    pub fn into_object(self) -> Result<Map, TypeMismatch> {
        match self {
            Value::Object(entries) => Ok(entries),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    /// Looks up `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Looks up element `index` when this is an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(elements) => elements.get(index),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Int> for Value {
    fn from(i: Int) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(String::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::Array(elements)
    }
}

impl From<Map> for Value {
    fn from(entries: Map) -> Self {
        Value::Object(entries)
    }
}
