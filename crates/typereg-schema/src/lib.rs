//! # typereg-schema: Type Registry, Validation & Coercion
//!
//! Declares named types over the primitive kinds of `typereg-core`,
//! validates runtime values against them, and turns rejections into
//! substituted values or errors.
//!
//! ## Registration (`registry`)
//!
//! [`TypeRegistry::create_type`] accepts a [`Shape`]: a primitive alias, a
//! record (possibly with inline nested records), an array union, or a
//! variant set. Inline nested records are registered as child types named
//! `<Parent><PascalField>`; the parent and all its children are committed
//! atomically or not at all.
//!
//! ## Validation (`validate`)
//!
//! [`Validator`] walks a value against a type and returns a
//! [`ValidationResult`] listing every [`Failure`] with its dotted path.
//! Reporting details are tuned through [`ValidatorConfig`].
//!
//! ## Coercion (`coerce`)
//!
//! [`TypeSystem::type_of`] and [`TypeSystem::coerce`] move a valid value
//! through untouched and hand an invalid one to a [`FailureHandler`].
//!
//! ```
//! use typereg_core::{Primitive, Value};
//! use typereg_schema::{Shape, TypeSystem};
//!
//! let system = TypeSystem::new();
//! let point = system
//!     .create_type(
//!         Shape::record().field("x", Primitive::Number).field("y", Primitive::Number),
//!         "Point",
//!     )
//!     .unwrap();
//!
//! let check = system.validator(point);
//! assert!(check(&Value::record([("x", 1), ("y", 2)])).is_valid());
//! assert!(!check(&Value::record([("x", 1)])).is_valid());
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `typereg-core` internally.
//! - Validation never fails: mismatches, unknown types included, are data.
//! - Registration is all-or-nothing and never replaces an existing type.

pub mod coerce;
pub mod config;
pub mod definition;
pub mod error;
pub mod registry;
pub mod system;
pub mod validate;

pub use coerce::{FailureHandler, FailureReport, RaiseTypeError, SharedHandler};
pub use config::{ArrayReporting, PrimitiveLabel, ValidatorConfig};
pub use definition::{Field, FieldShape, RecordShape, RegisteredType, Shape, TypeDefinition};
pub use error::{DuplicateTypeError, RegistryError, TypeError};
pub use registry::{pascal_case, variant, Resolved, TypeRegistry};
pub use system::{global, TypeSystem};
pub use validate::{Failure, ValidationResult, Validator};
