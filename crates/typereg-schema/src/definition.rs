//! # Type Definitions and Declaration Shapes
//!
//! Two layers describe a type:
//!
//! - [`Shape`] is what a caller declares. A record shape may contain inline
//!   nested records.
//! - [`TypeDefinition`] is what the registry stores. It is always flat:
//!   record fields and array members reference a [`TypeRef`], never an
//!   inline literal. `create_type` turns the first into the second.
//!
//! ## Example
//!
//! ```
//! use typereg_core::Primitive;
//! use typereg_schema::Shape;
//!
//! let shape = Shape::record()
//!     .field("id", Primitive::Number)
//!     .nested("nesting", Shape::record().field("level", Primitive::Number));
//! assert_eq!(shape.fields().len(), 2);
//! ```

use typereg_core::{Primitive, TypeId, TypeRef, Value};

/// A named field of a record definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Declared type of the field.
    pub ty: TypeRef,
}

/// A flat, stored type definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    /// Alias of a primitive kind.
    Primitive(Primitive),
    /// Ordered record fields.
    Record(Vec<Field>),
    /// Array whose every element matches at least one listed reference.
    ArrayOf(Vec<TypeRef>),
    /// Closed set of literal values.
    VariantSet(Vec<Value>),
}

impl TypeDefinition {
    /// The declared type of a record field.
    pub fn field(&self, name: &str) -> Option<&TypeRef> {
        match self {
            Self::Record(fields) => fields.iter().find(|f| f.name == name).map(|f| &f.ty),
            _ => None,
        }
    }

    /// Record fields in declaration order; empty for other definitions.
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Record(fields) => fields,
            _ => &[],
        }
    }
}

/// A registered type. Immutable once inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredType {
    /// Registry key.
    pub id: TypeId,
    /// Name given at declaration (or derived, for decomposed children).
    pub name: String,
    /// Flat definition.
    pub definition: TypeDefinition,
}

/// A type declaration as written by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Named alias of a primitive kind.
    Primitive(Primitive),
    /// Record, possibly with inline nested records.
    Record(RecordShape),
    /// Array of a union of references. Order and repeats are kept.
    ArrayOf(Vec<TypeRef>),
    /// Literal values, usually produced by [`crate::variant`].
    Variant(Vec<Value>),
}

impl Shape {
    /// Start a record declaration.
    pub fn record() -> RecordShape {
        RecordShape::new()
    }

    /// Declare an array whose elements match any of `refs`.
    pub fn array_of<T: Into<TypeRef>>(refs: impl IntoIterator<Item = T>) -> Self {
        Self::ArrayOf(refs.into_iter().map(Into::into).collect())
    }

    /// Declare a variant set.
    pub fn variant(values: Vec<Value>) -> Self {
        Self::Variant(values)
    }
}

impl From<RecordShape> for Shape {
    fn from(record: RecordShape) -> Self {
        Self::Record(record)
    }
}

impl From<Primitive> for Shape {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

/// Field of a record declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    /// Reference to a primitive kind or registered type.
    Ref(TypeRef),
    /// Inline record, registered as its own child type.
    Nested(RecordShape),
}

/// Fluent builder for record declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordShape {
    fields: Vec<(String, FieldShape)>,
}

impl RecordShape {
    /// Create an empty record declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field referencing a primitive kind or a type id.
    pub fn field(self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.with(name.into(), FieldShape::Ref(ty.into()))
    }

    /// Add an inline nested record.
    pub fn nested(self, name: impl Into<String>, record: RecordShape) -> Self {
        self.with(name.into(), FieldShape::Nested(record))
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[(String, FieldShape)] {
        &self.fields
    }

    pub(crate) fn into_fields(self) -> Vec<(String, FieldShape)> {
        self.fields
    }

    // A repeated name replaces the earlier field in place.
    fn with(mut self, name: String, shape: FieldShape) -> Self {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = shape,
            None => self.fields.push((name, shape)),
        }
        self
    }
}
