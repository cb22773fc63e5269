//! # Error Types
//!
//! Configuration errors raised while constructing identifiers and type
//! declarations. These always surface immediately to the caller; nothing in
//! the workspace retries or recovers from them.

use thiserror::Error;

use crate::primitive::Primitive;

/// Invalid arguments to a type declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A type name was empty or whitespace only.
    #[error("type name must be a non-empty string, received {received}")]
    MissingName {
        /// Description of what was received instead.
        received: String,
    },

    /// A type name contained a character that would corrupt its canonical id.
    #[error("type name {name:?} contains reserved character {ch:?}")]
    ReservedCharacter {
        /// The rejected name.
        name: String,
        /// The offending character.
        ch: char,
    },

    /// A type name whose canonical id is already taken by a primitive kind.
    #[error("type name {name:?} is reserved for the primitive kind {tag}")]
    ReservedName {
        /// The rejected name.
        name: String,
        /// The primitive tag it collides with.
        tag: String,
    },

    /// `variant` was given something other than a record.
    #[error("variant requires a record, received {received}")]
    VariantNotRecord {
        /// Kind of the value that was received.
        received: Primitive,
    },

    /// A string did not name any primitive kind.
    #[error("unknown primitive tag: {0}")]
    UnknownPrimitive(String),
}
