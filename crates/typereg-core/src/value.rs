//! # Runtime Values
//!
//! `Value` is the loosely-typed data that declared types are checked
//! against. It covers every kind in [`Primitive`]: scalars, ordered records,
//! arrays, callables, instants, symbolic atoms, patterns and fixed-width
//! numeric arrays.
//!
//! Records keep their fields in insertion order, so the values of a record
//! can be read back in declaration order (see `variant` in the schema crate).
//!
//! Identity-bearing kinds (`Function`, `Symbol`) compare by pointer, the
//! same way two separately created closures or atoms are never equal even
//! with identical bodies or descriptions.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::primitive::Primitive;

static UNDEFINED: Value = Value::Undefined;

/// A runtime value of any kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value. Also what a missing record field reads as.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Double-precision number.
    Number(f64),
    /// Text.
    String(String),
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Record of named fields.
    Object(Record),
    /// Callable.
    Function(Function),
    /// Instant in time (UTC).
    Date(DateTime<Utc>),
    /// Symbolic atom.
    Symbol(Symbol),
    /// Regular-expression pattern.
    RegExp(Pattern),
    /// Fixed-width numeric array.
    TypedArray(TypedArray),
}

impl Value {
    /// Build a record value from `(name, value)` pairs, keeping their order.
    pub fn record<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(fields.into_iter().collect())
    }

    /// Build an array value.
    pub fn array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build a byte buffer (a `Uint8Array`).
    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Self::TypedArray(TypedArray::Uint8(bytes.into()))
    }

    /// Build a callable value.
    pub fn function<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Function(Function::new(name, f))
    }

    /// Read a field. Missing fields, and fields of non-record values,
    /// read as [`Value::Undefined`].
    pub fn field(&self, name: &str) -> &Value {
        match self {
            Self::Object(record) => record.get(name).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// The record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Object(record) => Some(record),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    /// Host-style string conversion: `undefined`, `null`, integers without a
    /// fraction, arrays joined by commas, records as `[object Object]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // Nullish elements render empty when joined.
                    if !matches!(item, Self::Undefined | Self::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Object(_) => f.write_str(Primitive::Object.as_str()),
            Self::Function(func) => write!(f, "function {}() {{ [native code] }}", func.name()),
            Self::Date(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Symbol(sym) => write!(f, "{sym}"),
            Self::RegExp(pattern) => write!(f, "{pattern}"),
            Self::TypedArray(arr) => write!(f, "{arr}"),
        }
    }
}

fn write_number(f: &mut std::fmt::Formatter<'_>, n: f64) -> std::fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if (1e-6..1e21).contains(&n.abs()) {
        write!(f, "{n}")
    } else {
        // Exponent form outside the plain-decimal range, with an explicit
        // sign on positive exponents: `1e+21`, `1.5e-7`.
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exp),
        }
    }
}

// -- Record -------------------------------------------------------------------

/// Insertion-ordered record of named fields.
///
/// Re-inserting an existing name replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

// -- Identity-bearing kinds -----------------------------------------------------

type Callable = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A named callable. Equality is identity of the underlying closure.
#[derive(Clone)]
pub struct Function {
    name: String,
    call: Arc<Callable>,
}

impl Function {
    /// Wrap a closure.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(f),
        }
    }

    /// The declared name (may be empty for anonymous callables).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.call)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A symbolic atom. Two atoms are equal only if one is a clone of the other.
#[derive(Debug, Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Create a fresh atom with a description.
    pub fn new(description: &str) -> Self {
        Self(Arc::from(description))
    }

    /// The description given at creation.
    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// A regular-expression pattern, held as source text and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Pattern source.
    pub source: String,
    /// Flag letters, e.g. `"g"`.
    pub flags: String,
}

impl Pattern {
    /// Create a pattern.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

// -- Typed arrays ----------------------------------------------------------------

/// Fixed-width numeric array.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    /// The primitive kind of this array.
    pub fn kind(&self) -> Primitive {
        match self {
            Self::Int8(_) => Primitive::Int8Array,
            Self::Uint8(_) => Primitive::Uint8Array,
            Self::Uint8Clamped(_) => Primitive::Uint8ClampedArray,
            Self::Int16(_) => Primitive::Int16Array,
            Self::Uint16(_) => Primitive::Uint16Array,
            Self::Int32(_) => Primitive::Int32Array,
            Self::Uint32(_) => Primitive::Uint32Array,
            Self::Float32(_) => Primitive::Float32Array,
            Self::Float64(_) => Primitive::Float64Array,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Int8(v) => v.len(),
            Self::Uint8(v) | Self::Uint8Clamped(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn join<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl std::fmt::Display for TypedArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int8(v) => join(f, v),
            Self::Uint8(v) | Self::Uint8Clamped(v) => join(f, v),
            Self::Int16(v) => join(f, v),
            Self::Uint16(v) => join(f, v),
            Self::Int32(v) => join(f, v),
            Self::Uint32(v) => join(f, v),
            Self::Float32(v) => join(f, v),
            Self::Float64(v) => join(f, v),
        }
    }
}

// -- Conversions -----------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Object(record)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Self::Function(func)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Self::RegExp(pattern)
    }
}

impl From<TypedArray> for Value {
    fn from(arr: TypedArray) -> Self {
        Self::TypedArray(arr)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes an explicit null, not an absent value.
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    /// Convert a JSON document. Numbers become doubles; object fields keep
    /// the iteration order of the source map.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(map.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_field_reads_undefined() {
        let v = Value::record([("a", 1)]);
        assert_eq!(v.field("a"), &Value::Number(1.0));
        assert_eq!(v.field("b"), &Value::Undefined);
        assert_eq!(Value::Null.field("a"), &Value::Undefined);
    }

    #[test]
    fn record_keeps_insertion_order() {
        let mut r = Record::new();
        r.insert("z", 1);
        r.insert("a", 2);
        r.insert("m", 3);
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);

        assert_eq!(r.insert("a", 9), Some(Value::Number(2.0)));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(r.get("a"), Some(&Value::Number(9.0)));
    }

    #[test]
    fn display_matches_host_conversion() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(2).to_string(), "2");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from("2").to_string(), "2");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(
            Value::array([Value::from(1), Value::Null, Value::from("x")]).to_string(),
            "1,,x"
        );
        assert_eq!(Value::record([("a", 1)]).to_string(), "[object Object]");
        assert_eq!(Value::buffer(vec![1, 2]).to_string(), "1,2");
        assert_eq!(Value::from(Pattern::new("[a-z]", "g")).to_string(), "/[a-z]/g");
        assert_eq!(Value::from(Symbol::new("tag")).to_string(), "Symbol(tag)");
    }

    #[test]
    fn number_display_switches_to_exponent_form() {
        let cases = [
            (1e21, "1e+21"),
            (-1e21, "-1e+21"),
            (1.5e300, "1.5e+300"),
            (1e-7, "1e-7"),
            (-2.5e-9, "-2.5e-9"),
            (0.000001, "0.000001"),
            (123456789012345680000.0, "123456789012345680000"),
            (0.5, "0.5"),
        ];
        for (n, expected) in cases {
            assert_eq!(Value::from(n).to_string(), expected, "formatting {n:e}");
        }
    }

    #[test]
    fn date_display_is_utc_iso() {
        let dt = Utc.with_ymd_and_hms(2020, 5, 15, 18, 18, 45).unwrap();
        assert_eq!(Value::from(dt).to_string(), "2020-05-15T18:18:45.000Z");
    }

    #[test]
    fn function_equality_is_identity() {
        let f = Function::new("f", |_| Value::Null);
        let g = Function::new("f", |_| Value::Null);
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
        assert_eq!(f.call(&[]), Value::Null);
    }

    #[test]
    fn symbol_equality_is_identity() {
        let a = Symbol::new("x");
        let b = Symbol::new("x");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.description(), "x");
    }

    #[test]
    fn from_json() {
        let v = Value::from(serde_json::json!({
            "id": 4,
            "tags": ["a", null],
            "ok": true,
        }));
        assert_eq!(v.field("id"), &Value::Number(4.0));
        assert_eq!(
            v.field("tags"),
            &Value::Array(vec![Value::from("a"), Value::Null])
        );
        assert_eq!(v.field("ok"), &Value::Bool(true));
    }

    #[test]
    fn none_is_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(1)), Value::Number(1.0));
    }
}
