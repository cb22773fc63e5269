//! # Value Classifier
//!
//! `classify` maps every [`Value`] to exactly one [`Primitive`] kind. It is
//! total and pure: the same value always yields the same kind, and there is
//! no value it cannot classify.
//!
//! The `is_*` predicates are one-line checks against that classification.

use crate::primitive::Primitive;
use crate::value::Value;

/// Classify a runtime value.
pub fn classify(value: &Value) -> Primitive {
    match value {
        Value::Undefined => Primitive::Undefined,
        Value::Null => Primitive::Null,
        Value::Bool(_) => Primitive::Boolean,
        Value::Number(_) => Primitive::Number,
        Value::String(_) => Primitive::String,
        Value::Array(_) => Primitive::Array,
        Value::Object(_) => Primitive::Object,
        Value::Function(_) => Primitive::Function,
        Value::Date(_) => Primitive::Date,
        Value::Symbol(_) => Primitive::Symbol,
        Value::RegExp(_) => Primitive::RegExp,
        Value::TypedArray(arr) => arr.kind(),
    }
}

/// Whether `value` classifies as `kind`.
pub fn check_type(value: &Value, kind: Primitive) -> bool {
    classify(value) == kind
}

/// Whether `value` is an absent value.
pub fn is_undefined(value: &Value) -> bool {
    check_type(value, Primitive::Undefined)
}

/// Whether `value` is `null`.
pub fn is_null(value: &Value) -> bool {
    check_type(value, Primitive::Null)
}

/// Whether `value` is a record.
pub fn is_object(value: &Value) -> bool {
    check_type(value, Primitive::Object)
}

/// Whether `value` is an array.
pub fn is_array(value: &Value) -> bool {
    check_type(value, Primitive::Array)
}

/// Whether `value` is a string.
pub fn is_string(value: &Value) -> bool {
    check_type(value, Primitive::String)
}

/// Whether `value` is a number.
pub fn is_number(value: &Value) -> bool {
    check_type(value, Primitive::Number)
}

/// Whether `value` is a boolean.
pub fn is_boolean(value: &Value) -> bool {
    check_type(value, Primitive::Boolean)
}

/// Whether `value` is a callable.
pub fn is_function(value: &Value) -> bool {
    check_type(value, Primitive::Function)
}

/// Byte buffers are `Uint8Array`s.
pub fn is_buffer(value: &Value) -> bool {
    check_type(value, Primitive::Uint8Array)
}

/// Whether `value` is a date.
pub fn is_date(value: &Value) -> bool {
    check_type(value, Primitive::Date)
}

/// Whether `value` is a symbol.
pub fn is_symbol(value: &Value) -> bool {
    check_type(value, Primitive::Symbol)
}

/// Whether `value` is a regular-expression pattern.
pub fn is_regex(value: &Value) -> bool {
    check_type(value, Primitive::RegExp)
}

/// Whether `value` is an `Int8Array`.
pub fn is_int8_array(value: &Value) -> bool {
    check_type(value, Primitive::Int8Array)
}

/// Whether `value` is a `Uint8Array`.
pub fn is_uint8_array(value: &Value) -> bool {
    check_type(value, Primitive::Uint8Array)
}

/// Whether `value` is a `Uint8ClampedArray`.
pub fn is_uint8_clamped_array(value: &Value) -> bool {
    check_type(value, Primitive::Uint8ClampedArray)
}

/// Whether `value` is an `Int16Array`.
pub fn is_int16_array(value: &Value) -> bool {
    check_type(value, Primitive::Int16Array)
}

/// Whether `value` is a `Uint16Array`.
pub fn is_uint16_array(value: &Value) -> bool {
    check_type(value, Primitive::Uint16Array)
}

/// Whether `value` is an `Int32Array`.
pub fn is_int32_array(value: &Value) -> bool {
    check_type(value, Primitive::Int32Array)
}

/// Whether `value` is a `Uint32Array`.
pub fn is_uint32_array(value: &Value) -> bool {
    check_type(value, Primitive::Uint32Array)
}

/// Whether `value` is a `Float32Array`.
pub fn is_float32_array(value: &Value) -> bool {
    check_type(value, Primitive::Float32Array)
}

/// Whether `value` is a `Float64Array`.
pub fn is_float64_array(value: &Value) -> bool {
    check_type(value, Primitive::Float64Array)
}
