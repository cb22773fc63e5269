//! Fixture types shared by the integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use typereg_core::{Primitive, TypeId, TypeTag, Value};
use typereg_schema::{Shape, TypeSystem};

/// A type system with `One`, `Two`, `Three` and `Nested` registered.
pub struct Fixtures {
    pub system: TypeSystem,
    pub one: TypeId,
    pub two: TypeId,
    pub three: TypeId,
    pub nested: TypeId,
}

impl Fixtures {
    pub fn new() -> Self {
        let system = TypeSystem::new();

        let one = system
            .create_type(one_shape(), "One")
            .expect("register One");
        let two = system
            .create_type(
                Shape::record()
                    .field("id", Primitive::Number)
                    .field("occupation", Primitive::String)
                    .field("position", Primitive::Number),
                "Two",
            )
            .expect("register Two");
        let three = system
            .create_type(
                Shape::record()
                    .field("id", Primitive::Number)
                    .field("address", Primitive::String)
                    .field("apt", Primitive::Number)
                    .field("zip", Primitive::Number),
                "Three",
            )
            .expect("register Three");
        let nested = system
            .create_type(
                Shape::record()
                    .field("id", Primitive::Number)
                    .field("title", Primitive::String)
                    .field("one", &one)
                    .field("two", &two),
                "Nested",
            )
            .expect("register Nested");

        Self {
            system,
            one,
            two,
            three,
            nested,
        }
    }

    pub fn tag(id: &TypeId) -> TypeTag {
        TypeTag::from(id)
    }
}

pub fn one_shape() -> Shape {
    Shape::record()
        .field("id", Primitive::Number)
        .field("firstName", Primitive::String)
        .field("lastName", Primitive::String)
        .field("created_on", Primitive::Date)
        .into()
}

pub fn valid_one() -> Value {
    Value::record([
        ("id", Value::from(1)),
        ("firstName", Value::from("Jeremy")),
        ("lastName", Value::from("Pivens")),
        (
            "created_on",
            Value::from(Utc.with_ymd_and_hms(2012, 12, 12, 0, 0, 0).unwrap()),
        ),
    ])
}

pub fn valid_two() -> Value {
    Value::record([
        ("id", Value::from(2)),
        ("occupation", Value::from("engineer")),
        ("position", Value::from(3)),
    ])
}
