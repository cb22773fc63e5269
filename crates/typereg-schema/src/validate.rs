//! # Structural Validation
//!
//! Depth-first comparison of a runtime [`Value`] against a declared type,
//! producing a verdict plus an itemized list of path-labeled failures.
//!
//! ## Algorithm
//!
//! 1. Resolve the type. Primitive kinds resolve to themselves.
//! 2. **Primitive:** compare `classify(value)` with the kind.
//! 3. **ArrayOf:** the value must be an array, and every element must match
//!    at least one member of the union. Primitive members match by kind;
//!    custom members match if the element validates against them. An
//!    unmatched element fails the whole array with a single coarse failure
//!    unless [`ArrayReporting::PerElement`] is configured.
//! 4. **Record:** every declared field is classified in declaration order.
//!    A field whose declared type is custom is re-validated against that
//!    type under the prefix `<field>.`, and only the inner failures are
//!    kept. A field whose declared type is primitive keeps its flat
//!    failure. Inner (nested) failures come first, then flat failures; the
//!    combined list is de-duplicated, keeping first occurrences.
//! 5. The value is valid iff there are no failures.
//!
//! ## Failure Paths
//!
//! Field failures carry a dotted path from the validation root
//! (`one.id`). A failure for the root value itself has no field path and is
//! labeled per [`PrimitiveLabel`](crate::PrimitiveLabel), by default the
//! value's own display form (`"2"`, `"undefined"`).

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use typereg_core::{classify, Primitive, TypeRef, TypeTag, Value};

use crate::config::{ArrayReporting, ValidatorConfig};
use crate::definition::{Field, TypeDefinition};
use crate::registry::{Resolved, TypeRegistry};

/// A single mismatch between the kind found and the type declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Failure {
    /// Dotted path from the validation root, or the bare-value label.
    pub path: String,
    /// What the value was.
    pub actual: TypeTag,
    /// What the declaration required.
    pub expected: TypeTag,
}

impl Failure {
    /// Create a failure.
    pub fn new(path: impl Into<String>, actual: impl Into<TypeTag>, expected: impl Into<TypeTag>) -> Self {
        Self {
            path: path.into(),
            actual: actual.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: expected {}, got {}", self.path, self.expected, self.actual)
    }
}

/// Verdict plus itemized failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    failures: Vec<Failure>,
}

impl ValidationResult {
    fn from_failures(failures: Vec<Failure>) -> Self {
        Self {
            valid: failures.is_empty(),
            failures,
        }
    }

    /// Whether the value matched.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Failures in report order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if there are no failures.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consumes self and returns `(is_valid, failures)`.
    pub fn into_parts(self) -> (bool, Vec<Failure>) {
        (self.valid, self.failures)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return f.write_str("valid");
        }
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

/// Validator bound to a registry and a configuration.
///
/// Holds no state of its own; validating the same value twice with no
/// registration in between yields identical results.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a TypeRegistry,
    config: &'a ValidatorConfig,
}

impl<'a> Validator<'a> {
    /// Bind a validator.
    pub fn new(registry: &'a TypeRegistry, config: &'a ValidatorConfig) -> Self {
        Self { registry, config }
    }

    /// Validate `value` against `ty` from the root.
    pub fn validate(&self, ty: &TypeTag, value: &Value) -> ValidationResult {
        self.validate_at(ty, value, "")
    }

    /// Validate with every failure path prefixed by `path_prefix`.
    ///
    /// The prefix is used verbatim, so a nested location is passed with its
    /// trailing dot (`"order.customer."`).
    pub fn validate_at(&self, ty: &TypeTag, value: &Value, path_prefix: &str) -> ValidationResult {
        let mut failures = Vec::new();
        self.check(ty, value, path_prefix, &mut failures);
        tracing::trace!(
            type_tag = %ty,
            failures = failures.len(),
            "validated value"
        );
        ValidationResult::from_failures(failures)
    }

    fn check(&self, ty: &TypeTag, value: &Value, prefix: &str, acc: &mut Vec<Failure>) {
        let Some(resolved) = self.registry.resolve(ty) else {
            tracing::warn!(type_tag = %ty, "validating against unregistered type");
            acc.push(Failure::new(self.label(prefix, value), classify(value), ty.clone()));
            return;
        };

        match resolved {
            Resolved::Primitive(kind) => self.check_primitive(kind, value, prefix, acc),
            Resolved::Custom(registered) => match &registered.definition {
                TypeDefinition::Primitive(kind) => self.check_primitive(*kind, value, prefix, acc),
                TypeDefinition::Record(fields) => self.check_record(fields, value, prefix, acc),
                TypeDefinition::ArrayOf(refs) => self.check_array(ty, refs, value, prefix, acc),
                TypeDefinition::VariantSet(literals) => {
                    if !literals.contains(value) {
                        acc.push(Failure::new(self.label(prefix, value), classify(value), ty.clone()));
                    }
                }
            },
        }
    }

    fn check_primitive(&self, kind: Primitive, value: &Value, prefix: &str, acc: &mut Vec<Failure>) {
        let actual = classify(value);
        if actual != kind {
            acc.push(Failure::new(self.label(prefix, value), actual, kind));
        }
    }

    fn check_record(&self, fields: &[Field], value: &Value, prefix: &str, acc: &mut Vec<Failure>) {
        if value.as_record().is_none() {
            acc.push(Failure::new(self.label(prefix, value), classify(value), Primitive::Object));
            return;
        }

        // Flat pass: every field whose kind differs from its declared ref.
        let mismatched: Vec<(&Field, &Value, Primitive)> = fields
            .iter()
            .filter_map(|field| {
                let field_value = value.field(&field.name);
                let actual = classify(field_value);
                (field.ty != actual).then_some((field, field_value, actual))
            })
            .collect();

        let mut nested = Vec::new();
        let mut flat = Vec::new();
        for (field, field_value, actual) in mismatched {
            let path = format!("{prefix}{}", field.name);
            match &field.ty {
                TypeTag::Custom(_) => {
                    self.check(&field.ty, field_value, &format!("{path}."), &mut nested)
                }
                TypeTag::Primitive(_) => flat.push(Failure::new(path, actual, field.ty.clone())),
            }
        }

        let mut seen = HashSet::new();
        acc.extend(
            nested
                .into_iter()
                .chain(flat)
                .filter(|failure| seen.insert(failure.clone())),
        );
    }

    fn check_array(
        &self,
        ty: &TypeTag,
        refs: &[TypeRef],
        value: &Value,
        prefix: &str,
        acc: &mut Vec<Failure>,
    ) {
        let Some(items) = value.as_array() else {
            acc.push(Failure::new(self.label(prefix, value), classify(value), Primitive::Array));
            return;
        };

        match self.config.array_reporting {
            ArrayReporting::Coarse => {
                if !items.iter().all(|item| self.matches_any(refs, item)) {
                    acc.push(Failure::new(self.label(prefix, value), Primitive::Array, ty.clone()));
                }
            }
            ArrayReporting::PerElement => {
                for (index, item) in items.iter().enumerate() {
                    if !self.matches_any(refs, item) {
                        acc.push(Failure::new(format!("{prefix}{index}"), classify(item), ty.clone()));
                    }
                }
            }
        }
    }

    // Union membership only; diagnostics of custom members are discarded.
    fn matches_any(&self, refs: &[TypeRef], item: &Value) -> bool {
        refs.iter().any(|member| match member {
            TypeTag::Primitive(kind) => classify(item) == *kind,
            TypeTag::Custom(_) => {
                let mut scratch = Vec::new();
                self.check(member, item, "", &mut scratch);
                scratch.is_empty()
            }
        })
    }

    // Field path without its trailing dot, or the bare-value label at the root.
    fn label(&self, prefix: &str, value: &Value) -> String {
        if prefix.is_empty() {
            self.config.primitive_label.label(value)
        } else {
            prefix.strip_suffix('.').unwrap_or(prefix).to_string()
        }
    }
}
