//! # Type System
//!
//! One value bundling a [`TypeRegistry`], a [`ValidatorConfig`] and the
//! default failure-handler slot. Every public operation of the crate is
//! reachable from here.
//!
//! Hosts that want a process-wide catalog use [`global`]; tests and
//! embedders that need isolation construct their own `TypeSystem`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use typereg_core::{TypeId, TypeTag, Value};

use crate::coerce::{coerce_with, FailureHandler, RaiseTypeError, SharedHandler};
use crate::config::ValidatorConfig;
use crate::definition::{RegisteredType, Shape, TypeDefinition};
use crate::error::{RegistryError, TypeError};
use crate::registry::TypeRegistry;
use crate::validate::{ValidationResult, Validator};

/// Registry, configuration and default handler.
#[derive(Default)]
pub struct TypeSystem {
    registry: TypeRegistry,
    config: ValidatorConfig,
    default_handler: RwLock<Option<SharedHandler>>,
}

impl fmt::Debug for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSystem")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("default_handler", &self.default_handler.read().is_some())
            .finish()
    }
}

impl TypeSystem {
    /// Create a system with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a system with an explicit validator configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The process-wide instance. Same as [`global`].
    pub fn global() -> &'static Self {
        global()
    }

    // -- Registration ---------------------------------------------------------

    /// Declare and register a type. See [`TypeRegistry::create_type`].
    pub fn create_type(&self, shape: impl Into<Shape>, name: &str) -> Result<TypeId, RegistryError> {
        self.registry.create_type(shape, name)
    }

    /// Full metadata of a registered type.
    pub fn get_type_meta(&self, id: &TypeId) -> Option<Arc<RegisteredType>> {
        self.registry.get_type_meta(id)
    }

    /// Definition of a registered type.
    pub fn get_definition(&self, id: &TypeId) -> Option<TypeDefinition> {
        self.registry.get_definition(id)
    }

    /// Name of a registered type.
    pub fn get_type_name(&self, id: &TypeId) -> Option<String> {
        self.registry.get_type_name(id)
    }

    // -- Validation -----------------------------------------------------------

    /// Validate `value` against `ty`.
    pub fn validate(&self, ty: &TypeTag, value: &Value) -> ValidationResult {
        Validator::new(&self.registry, &self.config).validate(ty, value)
    }

    /// Validate with every failure path prefixed by `path_prefix`.
    pub fn validate_at(&self, ty: &TypeTag, value: &Value, path_prefix: &str) -> ValidationResult {
        Validator::new(&self.registry, &self.config).validate_at(ty, value, path_prefix)
    }

    /// A reusable validator for one type.
    ///
    /// The type is resolved on every call, so types registered after the
    /// validator was built are visible to it.
    pub fn validator(&self, ty: impl Into<TypeTag>) -> impl Fn(&Value) -> ValidationResult + '_ {
        let ty = ty.into();
        move |value| self.validate(&ty, value)
    }

    /// A predicate that holds when a value validates with no failures.
    pub fn is_type_of(&self, ty: impl Into<TypeTag>) -> impl Fn(&Value) -> bool + '_ {
        let ty = ty.into();
        move |value| self.validate(&ty, value).is_valid()
    }

    // -- Coercion -------------------------------------------------------------

    /// Check `value` and pass it through, or route the rejection.
    ///
    /// Handler precedence: `handler`, then the registered default, then
    /// [`RaiseTypeError`].
    pub fn coerce(
        &self,
        ty: &TypeTag,
        value: Value,
        handler: Option<&dyn FailureHandler>,
    ) -> Result<Value, TypeError> {
        if let Some(handler) = handler {
            return coerce_with(&self.registry, &self.config, ty, value, handler);
        }

        // Clone out of the slot; a handler may re-enter register_handler.
        let default = self.default_handler.read().clone();
        match default {
            Some(handler) => coerce_with(&self.registry, &self.config, ty, value, handler.as_ref()),
            None => coerce_with(&self.registry, &self.config, ty, value, &RaiseTypeError),
        }
    }

    /// A reusable coercion function for one type.
    pub fn type_of(
        &self,
        ty: impl Into<TypeTag>,
        handler: Option<SharedHandler>,
    ) -> impl Fn(Value) -> Result<Value, TypeError> + '_ {
        let ty = ty.into();
        move |value| self.coerce(&ty, value, handler.as_deref())
    }

    /// Install the default handler, returning the one it replaces.
    pub fn register_handler(&self, handler: impl FailureHandler + 'static) -> Option<SharedHandler> {
        tracing::debug!("replaced default failure handler");
        self.default_handler.write().replace(Arc::new(handler))
    }

    /// Remove the default handler so coercion raises again.
    pub fn clear_handler(&self) -> Option<SharedHandler> {
        self.default_handler.write().take()
    }

    // -- Accessors ------------------------------------------------------------

    /// The underlying registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The validator configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

/// Process-wide type system with the default configuration.
pub fn global() -> &'static TypeSystem {
    static GLOBAL: OnceLock<TypeSystem> = OnceLock::new();
    GLOBAL.get_or_init(TypeSystem::new)
}
