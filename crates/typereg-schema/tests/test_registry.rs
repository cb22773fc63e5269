//! # Registry Behavior
//!
//! Registration, duplicate rejection, metadata lookup and decomposition of
//! inline nested records, exercised through the `TypeSystem` facade.

mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use common::{one_shape, Fixtures};
use typereg_core::{ConfigError, Primitive, TypeId, TypeTag, Value};
use typereg_schema::{variant, Field, RegistryError, Shape, TypeDefinition, TypeSystem};

#[test]
fn registered_types_are_enumerable() {
    let fx = Fixtures::new();
    let registry = fx.system.registry();

    assert_eq!(registry.len(), 4);
    let ids = registry.type_ids();
    for id in [&fx.one, &fx.two, &fx.three, &fx.nested] {
        assert!(ids.contains(id), "{id} should be registered");
    }

    let snapshot = registry.snapshot();
    let one = snapshot
        .iter()
        .find(|ty| ty.id == fx.one)
        .expect("One in snapshot");
    assert_eq!(Some(one.clone()), fx.system.get_type_meta(&fx.one));
}

#[test]
fn duplicate_registration_is_rejected_with_message() {
    let fx = Fixtures::new();
    let err = fx.system.create_type(one_shape(), "One").unwrap_err();

    assert!(matches!(err, RegistryError::Duplicate(_)));
    assert_eq!(err.to_string(), "Type [object One] already exists");
    assert_eq!(fx.system.registry().len(), 4);
}

#[test]
fn invalid_names_are_config_errors() {
    let system = TypeSystem::new();
    for name in ["", "   ", "[object X]"] {
        let err = system.create_type(one_shape(), name).unwrap_err();
        assert!(
            matches!(err, RegistryError::Config(_)),
            "name {name:?} should be rejected, got {err:?}"
        );
    }
    assert!(system.registry().is_empty());
}

#[test]
fn type_meta_carries_id_name_and_definition() {
    let fx = Fixtures::new();
    let meta = fx.system.get_type_meta(&fx.one).expect("One is registered");

    assert_eq!(meta.id.as_str(), "[object One]");
    assert_eq!(meta.name, "One");

    let expected = TypeDefinition::Record(vec![
        Field { name: "id".into(), ty: Primitive::Number.into() },
        Field { name: "firstName".into(), ty: Primitive::String.into() },
        Field { name: "lastName".into(), ty: Primitive::String.into() },
        Field { name: "created_on".into(), ty: Primitive::Date.into() },
    ]);
    assert_eq!(meta.definition, expected);
    assert_eq!(fx.system.get_definition(&fx.one), Some(expected));
    assert_eq!(fx.system.get_type_name(&fx.one).as_deref(), Some("One"));
}

#[test]
fn unknown_ids_have_no_metadata() {
    let fx = Fixtures::new();
    let ghost = TypeId::for_name("Ghost").unwrap();
    assert!(fx.system.get_type_meta(&ghost).is_none());
    assert!(fx.system.get_definition(&ghost).is_none());
    assert!(fx.system.get_type_name(&ghost).is_none());
}

#[test]
fn inline_records_are_registered_as_children() {
    let system = TypeSystem::new();
    let x = system
        .create_type(
            Shape::record()
                .field("id", Primitive::Number)
                .nested(
                    "nesting",
                    Shape::record()
                        .field("level", Primitive::Number)
                        .nested("deepInner", Shape::record().field("flag", Primitive::Boolean)),
                ),
            "X",
        )
        .unwrap();

    let child = TypeId::for_name("XNesting").unwrap();
    let grandchild = TypeId::for_name("XNestingDeepInner").unwrap();

    assert_eq!(
        system.get_definition(&x).unwrap().field("nesting"),
        Some(&TypeTag::from(&child))
    );
    assert_eq!(
        system.get_definition(&child).unwrap().field("deepInner"),
        Some(&TypeTag::from(&grandchild))
    );
    assert_eq!(
        system.get_definition(&grandchild).unwrap().field("flag"),
        Some(&TypeTag::from(Primitive::Boolean))
    );

    let value = Value::record([
        ("id", Value::from(1)),
        (
            "nesting",
            Value::record([
                ("level", Value::from(2)),
                ("deepInner", Value::record([("flag", true)])),
            ]),
        ),
    ]);
    assert!(system.is_type_of(x)(&value));
}

#[test]
fn child_collision_leaves_registry_unchanged() {
    let system = TypeSystem::new();
    system.create_type(Primitive::String, "XNesting").unwrap();

    let err = system
        .create_type(
            Shape::record()
                .field("id", Primitive::Number)
                .nested("nesting", Shape::record().field("level", Primitive::Number)),
            "X",
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "Type [object XNesting] already exists");
    assert!(system.get_type_meta(&TypeId::for_name("X").unwrap()).is_none());
    assert_eq!(system.registry().len(), 1);
}

#[test]
fn variant_types_from_record_literals() {
    let system = TypeSystem::new();
    let literal = Value::record([("RED", "red"), ("GREEN", "green")]);
    let colour = system
        .create_type(Shape::variant(variant(&literal).unwrap()), "Colour")
        .unwrap();

    assert!(system.is_type_of(colour.clone())(&Value::from("green")));
    assert!(!system.is_type_of(colour)(&Value::from("blue")));

    assert!(matches!(
        variant(&Value::from("red")),
        Err(ConfigError::VariantNotRecord { .. })
    ));
}

#[test]
fn primitive_names_cannot_be_registered() {
    let system = TypeSystem::new();
    for name in ["Number", "Object", "Date", "Uint8Array"] {
        let err = system
            .create_type(Shape::record().field("a", Primitive::String), name)
            .unwrap_err();
        assert!(
            matches!(err, RegistryError::Config(ConfigError::ReservedName { .. })),
            "{name} should be reserved, got {err:?}"
        );
    }
    assert!(system.registry().is_empty());

    // A nested record whose derived child name is a primitive is rejected too.
    let err = system
        .create_type(
            Shape::record().nested("array", Shape::record().field("a", Primitive::Number)),
            "Uint8",
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::Config(ConfigError::ReservedName { .. })));
    assert!(system.registry().is_empty());
}

#[test]
fn concurrent_readers_never_see_partial_decomposition() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 50;

    let system = TypeSystem::new();
    let done = AtomicBool::new(false);
    let observed = AtomicUsize::new(0);

    thread::scope(|s| {
        for reader in 0..2 {
            let system = &system;
            let done = &done;
            let observed = &observed;
            s.spawn(move || {
                while !done.load(Ordering::Acquire) {
                    for i in 0..WRITERS * PER_WRITER {
                        let parent = TypeId::for_name(&format!("X{i}")).unwrap();
                        if system.get_type_meta(&parent).is_some() {
                            let child = TypeId::for_name(&format!("X{i}Nesting")).unwrap();
                            assert!(
                                system.get_type_meta(&child).is_some(),
                                "reader {reader} saw {parent} without {child}"
                            );
                            observed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            });
        }

        let writers: Vec<_> = (0..WRITERS)
            .map(|w| {
                let system = &system;
                s.spawn(move || {
                    for j in 0..PER_WRITER {
                        let i = w * PER_WRITER + j;
                        system
                            .create_type(
                                Shape::record()
                                    .field("id", Primitive::Number)
                                    .nested("nesting", Shape::record().field("level", Primitive::Number)),
                                &format!("X{i}"),
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(system.registry().len(), 2 * WRITERS * PER_WRITER);
}

#[test]
fn racing_duplicate_registrations_admit_exactly_one() {
    let system = TypeSystem::new();
    let successes = AtomicUsize::new(0);
    let duplicates = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                let shape = Shape::record()
                    .field("id", Primitive::Number)
                    .nested("nesting", Shape::record().field("level", Primitive::Number));
                match system.create_type(shape, "Contested") {
                    Ok(_) => successes.fetch_add(1, Ordering::SeqCst),
                    Err(RegistryError::Duplicate(_)) => duplicates.fetch_add(1, Ordering::SeqCst),
                    Err(other) => panic!("unexpected error {other:?}"),
                };
            });
        }
    });

    assert_eq!(successes.load(Ordering::SeqCst), 1);
    assert_eq!(duplicates.load(Ordering::SeqCst), 7);
    assert_eq!(system.registry().len(), 2);
}
