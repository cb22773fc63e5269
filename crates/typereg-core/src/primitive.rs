//! # Primitive Kinds: Single Source of Truth
//!
//! Defines the `Primitive` enum: the closed set of runtime value kinds the
//! classifier can produce. Every `match` on `Primitive` is exhaustive, so a
//! new kind forces every consumer (classifier, predicates, table) to handle it.
//!
//! ## Canonical Form
//!
//! Each kind renders as `[object <Kind>]`, e.g. `[object Number]`. Custom
//! type identifiers use the same bracketed form (see [`crate::TypeId`]), so
//! primitive and custom tags share one namespace and print uniformly in
//! failure reports.
//!
//! ## Byte Buffers
//!
//! There is no separate buffer kind. A byte buffer is a `Uint8Array`; the
//! `buffer` entry of [`PRIMITIVES`] is an alias of `u8`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// All runtime value kinds recognised by the classifier.
///
/// | # | Kind | Canonical tag |
/// |---|------|---------------|
/// |  1 | Undefined | `[object Undefined]` |
/// |  2 | Null | `[object Null]` |
/// |  3 | Object | `[object Object]` |
/// |  4 | Array | `[object Array]` |
/// |  5 | String | `[object String]` |
/// |  6 | Number | `[object Number]` |
/// |  7 | Boolean | `[object Boolean]` |
/// |  8 | Function | `[object Function]` |
/// |  9 | Date | `[object Date]` |
/// | 10 | Symbol | `[object Symbol]` |
/// | 11 | RegExp | `[object RegExp]` |
/// | 12–20 | typed arrays | `[object Int8Array]` … `[object Float64Array]` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Primitive {
    /// An absent value, including a field missing from a record.
    Undefined,
    /// The explicit null value.
    Null,
    /// A record of named fields.
    Object,
    /// An ordered list of values.
    Array,
    /// A text string.
    String,
    /// A double-precision number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// A callable value.
    Function,
    /// A point in time.
    Date,
    /// A symbolic atom.
    Symbol,
    /// A regular-expression pattern.
    RegExp,
    /// Fixed-width `i8` array.
    Int8Array,
    /// Fixed-width `u8` array; also the byte-buffer kind.
    Uint8Array,
    /// Fixed-width `u8` array with clamping semantics.
    Uint8ClampedArray,
    /// Fixed-width `i16` array.
    Int16Array,
    /// Fixed-width `u16` array.
    Uint16Array,
    /// Fixed-width `i32` array.
    Int32Array,
    /// Fixed-width `u32` array.
    Uint32Array,
    /// Fixed-width `f32` array.
    Float32Array,
    /// Fixed-width `f64` array.
    Float64Array,
}

/// Number of distinct primitive kinds.
pub const PRIMITIVE_KIND_COUNT: usize = 20;

/// The read-only primitive table, keyed by short name.
///
/// Twenty-one entries over twenty kinds: `buffer` and `u8` both map to
/// [`Primitive::Uint8Array`].
pub const PRIMITIVES: [(&str, Primitive); 21] = [
    ("undef", Primitive::Undefined),
    ("nul", Primitive::Null),
    ("obj", Primitive::Object),
    ("arr", Primitive::Array),
    ("str", Primitive::String),
    ("num", Primitive::Number),
    ("bool", Primitive::Boolean),
    ("func", Primitive::Function),
    ("buffer", Primitive::Uint8Array),
    ("date", Primitive::Date),
    ("symb", Primitive::Symbol),
    ("regex", Primitive::RegExp),
    ("i8", Primitive::Int8Array),
    ("u8", Primitive::Uint8Array),
    ("u8Clamped", Primitive::Uint8ClampedArray),
    ("i16", Primitive::Int16Array),
    ("u16", Primitive::Uint16Array),
    ("i32", Primitive::Int32Array),
    ("u32", Primitive::Uint32Array),
    ("f32", Primitive::Float32Array),
    ("f64", Primitive::Float64Array),
];

impl Primitive {
    /// Returns all primitive kinds in canonical order.
    pub fn all() -> &'static [Primitive] {
        &[
            Self::Undefined,
            Self::Null,
            Self::Object,
            Self::Array,
            Self::String,
            Self::Number,
            Self::Boolean,
            Self::Function,
            Self::Date,
            Self::Symbol,
            Self::RegExp,
            Self::Int8Array,
            Self::Uint8Array,
            Self::Uint8ClampedArray,
            Self::Int16Array,
            Self::Uint16Array,
            Self::Int32Array,
            Self::Uint32Array,
            Self::Float32Array,
            Self::Float64Array,
        ]
    }

    /// Bare kind name, e.g. `"Number"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Null => "Null",
            Self::Object => "Object",
            Self::Array => "Array",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Function => "Function",
            Self::Date => "Date",
            Self::Symbol => "Symbol",
            Self::RegExp => "RegExp",
            Self::Int8Array => "Int8Array",
            Self::Uint8Array => "Uint8Array",
            Self::Uint8ClampedArray => "Uint8ClampedArray",
            Self::Int16Array => "Int16Array",
            Self::Uint16Array => "Uint16Array",
            Self::Int32Array => "Int32Array",
            Self::Uint32Array => "Uint32Array",
            Self::Float32Array => "Float32Array",
            Self::Float64Array => "Float64Array",
        }
    }

    /// Canonical tag string, e.g. `"[object Number]"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "[object Undefined]",
            Self::Null => "[object Null]",
            Self::Object => "[object Object]",
            Self::Array => "[object Array]",
            Self::String => "[object String]",
            Self::Number => "[object Number]",
            Self::Boolean => "[object Boolean]",
            Self::Function => "[object Function]",
            Self::Date => "[object Date]",
            Self::Symbol => "[object Symbol]",
            Self::RegExp => "[object RegExp]",
            Self::Int8Array => "[object Int8Array]",
            Self::Uint8Array => "[object Uint8Array]",
            Self::Uint8ClampedArray => "[object Uint8ClampedArray]",
            Self::Int16Array => "[object Int16Array]",
            Self::Uint16Array => "[object Uint16Array]",
            Self::Int32Array => "[object Int32Array]",
            Self::Uint32Array => "[object Uint32Array]",
            Self::Float32Array => "[object Float32Array]",
            Self::Float64Array => "[object Float64Array]",
        }
    }

    /// Look up a kind by its short table key (`"num"`, `"buffer"`, ...).
    pub fn by_key(key: &str) -> Option<Primitive> {
        PRIMITIVES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, p)| *p)
    }
}

/// Whether `tag` is the canonical string of a primitive kind.
///
/// `"[object Number]"` is primitive; `"[object One]"` and `"number"` are not.
pub fn is_primitive_tag(tag: &str) -> bool {
    Primitive::all().iter().any(|p| p.as_str() == tag)
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = ConfigError;

    /// Parse a canonical tag string such as `"[object Date]"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Primitive::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPrimitive(s.to_string()))
    }
}

impl TryFrom<String> for Primitive {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Primitive> for String {
    fn from(p: Primitive) -> Self {
        p.as_str().to_string()
    }
}
