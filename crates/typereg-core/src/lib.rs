//! # typereg-core: Value Model and Primitive Kinds
//!
//! The leaf crate of the workspace. It defines what a runtime value is and
//! how each value is classified, independent of any declared type.
//!
//! ## Key Design Principles
//!
//! 1. **Closed classification.** `Primitive` is a single enum of the twenty
//!    runtime kinds. `classify()` is an exhaustive `match` over `Value`, so
//!    adding a value kind forces the classifier to handle it.
//!
//! 2. **One identifier namespace.** Primitive kinds and custom types share
//!    the canonical `[object <Name>]` form. `TypeTag` is the sum of the two;
//!    `TypeId` is only ever a custom type.
//!
//! 3. **Validated identifiers.** `TypeId::for_name()` rejects empty, blank
//!    and bracket-containing names, so no malformed id can reach a registry.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `typereg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod classify;
pub mod error;
pub mod identity;
pub mod primitive;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use classify::{
    check_type, classify, is_array, is_boolean, is_buffer, is_date, is_float32_array,
    is_float64_array, is_function, is_int16_array, is_int32_array, is_int8_array, is_null,
    is_number, is_object, is_regex, is_string, is_symbol, is_uint16_array, is_uint32_array,
    is_uint8_array, is_uint8_clamped_array, is_undefined,
};
pub use error::ConfigError;
pub use identity::{TypeId, TypeRef, TypeTag};
pub use primitive::{is_primitive_tag, Primitive, PRIMITIVES, PRIMITIVE_KIND_COUNT};
pub use value::{Function, Pattern, Record, Symbol, TypedArray, Value};
