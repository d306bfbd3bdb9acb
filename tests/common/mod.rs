//! Common test utilities for integration tests.

#![allow(dead_code)]

use relational_query::{DataType, Database, Field, FieldDefinition, OrderDirection, OrderKey, Table};

/// Declared columns of the `person` table.
pub fn person_definitions() -> Vec<FieldDefinition> {
    vec![
        ("prename", DataType::Text).into(),
        ("name", DataType::Text).into(),
        ("age", DataType::Integer).into(),
        ("member", DataType::Boolean).into(),
    ]
}

/// Rows of the `person` table as loosely typed JSON; `member` uses 0/1.
pub const PERSON_JSON: &str = r#"[
    {"prename": "Gwen", "name": "Portillo", "age": 45, "member": 0},
    {"prename": "Wallace", "name": "Todd", "age": 27, "member": 0},
    {"prename": "Zariah", "name": "Curtis", "age": 63, "member": 0},
    {"prename": "Muhammad", "name": "Avery", "age": 33, "member": 1},
    {"prename": "Ahmad", "name": "Johnson", "age": 26, "member": 1},
    {"prename": "Taylor", "name": "Hodges", "age": 21, "member": 0},
    {"prename": "Emma", "name": "Hodges", "age": 55, "member": 0},
    {"prename": "Kaydence", "name": "McClain", "age": 37, "member": 0},
    {"prename": "Marleigh", "name": "Holland", "age": 40, "member": 1},
    {"prename": "Brady", "name": "Brandt", "age": 34, "member": 0},
    {"prename": "Loretta", "name": "Mejia", "age": 51, "member": 0},
    {"prename": "Alayah", "name": "McGee", "age": 66, "member": 0},
    {"prename": "Wallace", "name": "Weber", "age": 44, "member": 1},
    {"prename": "Loretta", "name": "Schneider", "age": 23, "member": 0},
    {"prename": "Alayah", "name": "McGee", "age": 23, "member": 0},
    {"prename": "Atticus", "name": "Allison", "age": 50, "member": 1},
    {"prename": "Edison", "name": "Beltran", "age": 49, "member": 0},
    {"prename": "Atticus", "name": "Allison", "age": 47, "member": 1},
    {"prename": "Kaydence", "name": "Portillo", "age": 30, "member": 0}
]"#;

/// Database holding the `person` table.
pub fn person_database() -> Database {
    let table = Table::from_json_str(person_definitions(), PERSON_JSON)
        .expect("person fixture should load");
    Database::new().with_table("person", table)
}

/// Surname (renamed), prename, age and member.
pub fn person_fields() -> Vec<Field> {
    vec![
        Field::renamed("name", "surname"),
        Field::plain("prename"),
        Field::plain("age"),
        Field::plain("member"),
    ]
}

/// Surname ascending, then prename descending.
pub fn person_order() -> Vec<OrderKey> {
    vec![
        OrderKey::field("name"),
        OrderKey::with_direction("prename", OrderDirection::Descending),
    ]
}
