//! # Error Types
//!
//! Registration errors (`RegistryError`) and coercion errors (`TypeError`).
//!
//! Validation mismatches are not errors: they are data carried by
//! [`crate::ValidationResult`]. They only become a `TypeError` when the
//! coercion wrapper escalates them through its built-in handler.

use thiserror::Error;
use typereg_core::{ConfigError, TypeId, TypeTag};

use crate::validate::Failure;

/// A type with this id is already registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Type {type_id} already exists")]
pub struct DuplicateTypeError {
    /// The conflicting id.
    pub type_id: TypeId,
}

/// Error returned by `create_type`.
///
/// The registry is unchanged whenever this is returned: no parent or child
/// type of the rejected declaration is inserted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Invalid declaration arguments.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The declared type, or one of its decomposed children, already exists.
    #[error(transparent)]
    Duplicate(#[from] DuplicateTypeError),
}

/// Error surfaced by the coercion wrapper.
#[derive(Error, Debug)]
pub enum TypeError {
    /// The value did not validate and no handler substituted a value.
    #[error("{message}")]
    Mismatch {
        /// `expected type <tag> got <value>`.
        message: String,
        /// The type that was checked.
        type_tag: TypeTag,
        /// Itemized mismatches.
        failures: Vec<Failure>,
    },

    /// The type is neither primitive nor registered.
    #[error("{message}")]
    NotRegistered {
        /// `Type <tag> not registered`.
        message: String,
        /// The unknown type.
        type_tag: TypeTag,
    },

    /// A custom handler refused the value.
    #[error("rejected by handler: {0}")]
    Rejected(String),

    /// A custom handler failed with its own error.
    #[error("handler failed: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),
}
