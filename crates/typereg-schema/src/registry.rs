//! # Type Registry
//!
//! The catalog of declared types, keyed by [`TypeId`].
//!
//! ## Invariants
//!
//! - A `TypeId` maps to at most one [`RegisteredType`] for the life of the
//!   registry. Re-registering fails with [`DuplicateTypeError`]; nothing is
//!   overwritten, updated or removed.
//! - Every stored definition is flat. Inline nested records are decomposed
//!   into child types named `<Parent><PascalCase(field)>` before insertion.
//! - Registration is transactional. The whole decomposition is staged
//!   first, then checked and inserted under one write lock, so a reader
//!   never observes a parent without its children and a failed declaration
//!   leaves no trace.
//!
//! Primitive kinds are implicitly registered: [`TypeRegistry::resolve`]
//! returns `TypeDefinition::Primitive(p)` for them without a lookup.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use typereg_core::{classify, ConfigError, Primitive, TypeId, TypeTag, Value};

use crate::definition::{Field, FieldShape, RecordShape, RegisteredType, Shape, TypeDefinition};
use crate::error::{DuplicateTypeError, RegistryError};

/// Thread-safe catalog of registered types.
///
/// Reads clone an `Arc` snapshot out of the lock and never hold it while
/// validating.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<TypeId, Arc<RegisteredType>>>,
}

/// A resolved definition: shared from the registry for custom types,
/// synthesized for primitives.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A primitive kind acting as its own definition.
    Primitive(Primitive),
    /// A registered custom type.
    Custom(Arc<RegisteredType>),
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare and register a new type.
    ///
    /// - A record shape is stored as a `Record` definition after its inline
    ///   nested records are registered as child types.
    /// - An array shape is stored verbatim as `ArrayOf`.
    /// - A primitive shape is stored as a named alias.
    /// - A variant shape is stored as a `VariantSet`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Config`] if `name` is empty, blank or contains
    ///   `[`/`]`.
    /// - [`RegistryError::Duplicate`] if the type, or any child it would
    ///   create, is already registered. The registry is left unchanged.
    pub fn create_type(
        &self,
        shape: impl Into<Shape>,
        name: &str,
    ) -> Result<TypeId, RegistryError> {
        let id = TypeId::for_name(name)?;
        let staged = match shape.into() {
            Shape::Primitive(p) => vec![registered(id.clone(), name, TypeDefinition::Primitive(p))],
            Shape::ArrayOf(refs) => vec![registered(id.clone(), name, TypeDefinition::ArrayOf(refs))],
            Shape::Variant(values) => {
                vec![registered(id.clone(), name, TypeDefinition::VariantSet(values))]
            }
            Shape::Record(record) => decompose(name, record)?,
        };

        self.commit(staged)?;
        Ok(id)
    }

    // Check every staged id against the catalog and against each other,
    // then insert all of them under the same write lock.
    fn commit(&self, staged: Vec<RegisteredType>) -> Result<(), DuplicateTypeError> {
        let mut types = self.types.write();

        {
            let mut seen = HashSet::with_capacity(staged.len());
            for ty in &staged {
                if types.contains_key(&ty.id) || !seen.insert(&ty.id) {
                    tracing::warn!(type_id = %ty.id, "rejected duplicate type registration");
                    return Err(DuplicateTypeError {
                        type_id: ty.id.clone(),
                    });
                }
            }
        }

        for ty in staged {
            tracing::debug!(type_id = %ty.id, name = %ty.name, "registered type");
            types.insert(ty.id.clone(), Arc::new(ty));
        }
        Ok(())
    }

    /// Full metadata of a registered type.
    pub fn get_type_meta(&self, id: &TypeId) -> Option<Arc<RegisteredType>> {
        self.types.read().get(id).cloned()
    }

    /// Definition of a registered type.
    pub fn get_definition(&self, id: &TypeId) -> Option<TypeDefinition> {
        self.get_type_meta(id).map(|ty| ty.definition.clone())
    }

    /// Name of a registered type.
    pub fn get_type_name(&self, id: &TypeId) -> Option<String> {
        self.get_type_meta(id).map(|ty| ty.name.clone())
    }

    /// Resolve any tag to its definition. Primitives always resolve.
    pub fn resolve(&self, tag: &TypeTag) -> Option<Resolved> {
        match tag {
            TypeTag::Primitive(p) => Some(Resolved::Primitive(*p)),
            TypeTag::Custom(id) => self.get_type_meta(id).map(Resolved::Custom),
        }
    }

    /// Whether a tag is a primitive kind or a registered type.
    pub fn contains(&self, tag: &TypeTag) -> bool {
        match tag {
            TypeTag::Primitive(_) => true,
            TypeTag::Custom(id) => self.types.read().contains_key(id),
        }
    }

    /// All registered ids, sorted.
    pub fn type_ids(&self) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.types.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Every registered type, sorted by id.
    pub fn snapshot(&self) -> Vec<Arc<RegisteredType>> {
        let mut types: Vec<Arc<RegisteredType>> = self.types.read().values().cloned().collect();
        types.sort_by(|a, b| a.id.cmp(&b.id));
        types
    }

    /// Number of registered custom types.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Whether no custom type is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn registered(id: TypeId, name: &str, definition: TypeDefinition) -> RegisteredType {
    RegisteredType {
        id,
        name: name.to_string(),
        definition,
    }
}

/// Flatten a record declaration into the parent plus one registered type
/// per inline nested record, parent first.
///
/// Uses an explicit worklist: each entry is a type name and the record
/// shape still to be flattened under that name.
fn decompose(name: &str, record: RecordShape) -> Result<Vec<RegisteredType>, ConfigError> {
    let mut staged = Vec::new();
    let mut worklist = vec![(name.to_string(), record)];

    while let Some((type_name, record)) = worklist.pop() {
        let id = TypeId::for_name(&type_name)?;
        let mut fields = Vec::with_capacity(record.fields().len());

        for (field_name, field) in record.into_fields() {
            let ty = match field {
                FieldShape::Ref(ty) => ty,
                FieldShape::Nested(child) => {
                    let child_name = format!("{type_name}{}", pascal_case(&field_name));
                    let child_id = TypeId::for_name(&child_name)?;
                    tracing::debug!(
                        parent = %id,
                        child = %child_id,
                        field = %field_name,
                        "decomposed nested record"
                    );
                    worklist.push((child_name, child));
                    TypeTag::Custom(child_id)
                }
            };
            fields.push(Field {
                name: field_name,
                ty,
            });
        }

        staged.push(registered(id, &type_name, TypeDefinition::Record(fields)));
    }

    Ok(staged)
}

/// `created_on` → `CreatedOn`, `nesting` → `Nesting`, `firstName` → `FirstName`.
///
/// Splits on `_`, `-` and whitespace and upper-cases the first letter of
/// each segment; the rest of each segment is kept as written.
pub fn pascal_case(field: &str) -> String {
    field
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Values of a record in declaration order, for use as a variant set.
///
/// # Errors
///
/// Returns [`ConfigError::VariantNotRecord`] if `literal` is not a record.
pub fn variant(literal: &Value) -> Result<Vec<Value>, ConfigError> {
    match literal {
        Value::Object(record) => Ok(record.values().cloned().collect()),
        other => Err(ConfigError::VariantNotRecord {
            received: classify(other),
        }),
    }
}
