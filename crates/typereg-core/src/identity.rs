//! # Type Identity Newtypes
//!
//! `TypeId` names a registered custom type; `TypeTag` names any type at all,
//! primitive or custom. Keeping them distinct means a registry lookup can
//! only be asked about custom ids, while validation and failure reports
//! accept either.
//!
//! Both share the canonical `[object <Name>]` string form, and equality is
//! by that string: two ids built from the same name are the same id.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::primitive::{is_primitive_tag, Primitive};

const TAG_PREFIX: &str = "[object ";
const TAG_SUFFIX: &str = "]";

/// Registry key of a custom type, in canonical `[object <Name>]` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeId(String);

impl TypeId {
    /// Build the canonical id for a type name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingName`] for an empty or blank name and
    /// [`ConfigError::ReservedCharacter`] if the name contains `[` or `]`.
    /// Names of primitive kinds (`Number`, `Uint8Array`, ...) yield
    /// [`ConfigError::ReservedName`].
    pub fn for_name(name: &str) -> Result<Self, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::MissingName {
                received: "empty string".to_string(),
            });
        }
        if name.trim().is_empty() {
            return Err(ConfigError::MissingName {
                received: format!("blank string {name:?}"),
            });
        }
        if let Some(ch) = name.chars().find(|c| matches!(c, '[' | ']')) {
            return Err(ConfigError::ReservedCharacter {
                name: name.to_string(),
                ch,
            });
        }
        let canonical = format!("{TAG_PREFIX}{name}{TAG_SUFFIX}");
        if is_primitive_tag(&canonical) {
            return Err(ConfigError::ReservedName {
                name: name.to_string(),
                tag: canonical,
            });
        }
        Ok(Self(canonical))
    }

    /// The canonical string, e.g. `"[object One]"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare type name, e.g. `"One"`.
    pub fn name(&self) -> &str {
        &self.0[TAG_PREFIX.len()..self.0.len() - TAG_SUFFIX.len()]
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TypeId {
    type Error = ConfigError;

    /// Parse a canonical `[object <Name>]` string.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s
            .strip_prefix(TAG_PREFIX)
            .and_then(|rest| rest.strip_suffix(TAG_SUFFIX))
        {
            Some(name) => Self::for_name(name),
            None => Err(ConfigError::MissingName {
                received: format!("non-canonical id {s:?}"),
            }),
        }
    }
}

impl From<TypeId> for String {
    fn from(id: TypeId) -> Self {
        id.0
    }
}

/// Identifier of any type: one of the primitive kinds, or a custom type.
///
/// Also used as the reference held by record fields and array unions
/// (see [`TypeRef`]). Built-in kinds match values structurally by
/// classification; custom tags match nominally through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeTag {
    /// A built-in runtime kind.
    Primitive(Primitive),
    /// A registered (or to-be-registered) custom type.
    Custom(TypeId),
}

/// A field or element reference inside a type definition.
pub type TypeRef = TypeTag;

impl TypeTag {
    /// Whether this tag names a primitive kind.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// The primitive kind, if any.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(p) => Some(*p),
            Self::Custom(_) => None,
        }
    }

    /// The custom id, if any.
    pub fn as_custom(&self) -> Option<&TypeId> {
        match self {
            Self::Primitive(_) => None,
            Self::Custom(id) => Some(id),
        }
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Primitive(p) => p.as_str(),
            Self::Custom(id) => id.as_str(),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Primitive> for TypeTag {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<TypeId> for TypeTag {
    fn from(id: TypeId) -> Self {
        Self::Custom(id)
    }
}

impl From<&TypeId> for TypeTag {
    fn from(id: &TypeId) -> Self {
        Self::Custom(id.clone())
    }
}

impl PartialEq<Primitive> for TypeTag {
    fn eq(&self, other: &Primitive) -> bool {
        self.as_primitive() == Some(*other)
    }
}

impl TryFrom<String> for TypeTag {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if is_primitive_tag(&s) {
            s.parse().map(Self::Primitive)
        } else {
            TypeId::try_from(s).map(Self::Custom)
        }
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Primitive(p) => p.as_str().to_string(),
            TypeTag::Custom(id) => id.into(),
        }
    }
}
