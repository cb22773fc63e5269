//! # Coercion
//!
//! Turns a validation verdict into an outcome: a valid value is moved
//! through unchanged, an invalid one is handed to a [`FailureHandler`],
//! which either substitutes a replacement or returns an error.

use std::sync::Arc;

use typereg_core::{TypeTag, Value};

use crate::config::ValidatorConfig;
use crate::error::TypeError;
use crate::registry::TypeRegistry;
use crate::validate::{Failure, Validator};

/// Everything a handler needs to know about a rejected value.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    /// The type checked against.
    pub type_tag: TypeTag,
    /// The rejected value, handed over by ownership.
    pub value: Value,
    /// Itemized mismatches. Empty when the type is not registered.
    pub failures: Vec<Failure>,
    /// False when the tag is neither primitive nor registered.
    pub registered: bool,
}

impl FailureReport {
    /// Human-readable summary.
    pub fn message(&self) -> String {
        if self.registered {
            format!("expected type {} got {}", self.type_tag, self.value)
        } else {
            format!("Type {} not registered", self.type_tag)
        }
    }

    /// The error the built-in handler raises for this report.
    pub fn into_error(self) -> TypeError {
        let message = self.message();
        if self.registered {
            TypeError::Mismatch {
                message,
                type_tag: self.type_tag,
                failures: self.failures,
            }
        } else {
            TypeError::NotRegistered {
                message,
                type_tag: self.type_tag,
            }
        }
    }
}

/// Decides what happens to a value that failed validation.
///
/// `Ok` substitutes a value for the rejected one; `Err` propagates to the
/// caller unchanged. Any `Fn(FailureReport) -> Result<Value, TypeError>`
/// closure is a handler.
pub trait FailureHandler: Send + Sync {
    /// Handle one rejected value.
    fn handle(&self, report: FailureReport) -> Result<Value, TypeError>;
}

impl<F> FailureHandler for F
where
    F: Fn(FailureReport) -> Result<Value, TypeError> + Send + Sync,
{
    fn handle(&self, report: FailureReport) -> Result<Value, TypeError> {
        self(report)
    }
}

/// Built-in handler: always raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaiseTypeError;

impl FailureHandler for RaiseTypeError {
    fn handle(&self, report: FailureReport) -> Result<Value, TypeError> {
        Err(report.into_error())
    }
}

/// Shared handler, as stored in a default slot.
pub type SharedHandler = Arc<dyn FailureHandler>;

/// Check `value` against `ty` and route a rejection to `handler`.
pub(crate) fn coerce_with(
    registry: &TypeRegistry,
    config: &ValidatorConfig,
    ty: &TypeTag,
    value: Value,
    handler: &dyn FailureHandler,
) -> Result<Value, TypeError> {
    if !registry.contains(ty) {
        tracing::warn!(type_tag = %ty, "coercing to unregistered type");
        return handler.handle(FailureReport {
            type_tag: ty.clone(),
            value,
            failures: Vec::new(),
            registered: false,
        });
    }

    let (valid, failures) = Validator::new(registry, config).validate(ty, &value).into_parts();
    if valid {
        return Ok(value);
    }

    tracing::debug!(type_tag = %ty, failures = failures.len(), "value rejected, invoking handler");
    handler.handle(FailureReport {
        type_tag: ty.clone(),
        value,
        failures,
        registered: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use typereg_core::{Primitive, TypeId};

    fn report(registered: bool) -> FailureReport {
        FailureReport {
            type_tag: if registered {
                Primitive::Number.into()
            } else {
                TypeId::for_name("Ghost").unwrap().into()
            },
            value: Value::from("abc"),
            failures: Vec::new(),
            registered,
        }
    }

    #[test]
    fn messages() {
        assert_eq!(report(true).message(), "expected type [object Number] got abc");
        assert_eq!(report(false).message(), "Type [object Ghost] not registered");
    }

    #[test]
    fn raise_handler_maps_to_variants() {
        match RaiseTypeError.handle(report(true)) {
            Err(TypeError::Mismatch { message, type_tag, .. }) => {
                assert_eq!(message, "expected type [object Number] got abc");
                assert_eq!(type_tag, Primitive::Number);
            }
            other => panic!("expected Mismatch, got {other:?}"),
        }
        assert!(matches!(
            RaiseTypeError.handle(report(false)),
            Err(TypeError::NotRegistered { .. })
        ));
    }

    #[test]
    fn valid_value_passes_through() {
        let registry = TypeRegistry::new();
        let config = ValidatorConfig::default();
        let out = coerce_with(
            &registry,
            &config,
            &Primitive::String.into(),
            Value::from("ok"),
            &RaiseTypeError,
        )
        .unwrap();
        assert_eq!(out, Value::from("ok"));
    }

    #[test]
    fn closure_handler_substitutes() {
        let registry = TypeRegistry::new();
        let config = ValidatorConfig::default();
        let fallback = |report: FailureReport| -> Result<Value, TypeError> {
            assert_eq!(report.failures.len(), 1);
            Ok(Value::from(0))
        };
        let out = coerce_with(
            &registry,
            &config,
            &Primitive::Number.into(),
            Value::from("x"),
            &fallback,
        )
        .unwrap();
        assert_eq!(out, Value::from(0));
    }

    #[test]
    fn unregistered_type_reaches_handler() {
        let registry = TypeRegistry::new();
        let config = ValidatorConfig::default();
        let ty: TypeTag = TypeId::for_name("Ghost").unwrap().into();
        let err = coerce_with(&registry, &config, &ty, Value::from(1), &RaiseTypeError).unwrap_err();
        assert_eq!(err.to_string(), "Type [object Ghost] not registered");
    }
}
