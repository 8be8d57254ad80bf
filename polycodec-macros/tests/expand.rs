//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Tests for `#[derive(Describe)]` expansion.
//!
//! These tests verify that derived descriptors carry names, visibility,
//! tags and field types the way the Avro schema generator expects.

#![allow(dead_code)]

use polycodec::{Describe, StructDescriptor, TypeDescriptor, TypeKind};
use std::any::TypeId;

#[derive(Describe)]
pub struct User {
    #[codec(avro = "user_name,omitempty", json = "name")]
    pub name: String,
    pub age: Option<u8>,
    #[codec(avro = "-")]
    pub password: String,
    internal: bool,
    pub r#type: i32,
}

#[derive(Describe)]
#[codec(anonymous)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Describe)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Describe)]
pub struct Node {
    pub value: i64,
    pub children: Vec<Node>,
    pub parent: Option<Box<Node>>,
}

fn record(descriptor: &TypeDescriptor) -> &StructDescriptor {
    match descriptor.kind() {
        TypeKind::Struct(record) => record,
        other => panic!("expected a struct, got {other:?}"),
    }
}

#[test]
fn test_record_name_and_module() {
    let descriptor = User::describe();
    let user = record(&descriptor);
    assert_eq!(user.name(), Some("User"));
    assert_eq!(user.module_path(), Some(module_path!()));
    assert_eq!(descriptor.type_id(), TypeId::of::<User>());
}

#[test]
fn test_fields_in_declaration_order() {
    let descriptor = User::describe();
    let names: Vec<_> = record(&descriptor).fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["name", "age", "password", "internal", "type"]);
}

#[test]
fn test_visibility_and_tags() {
    let descriptor = User::describe();
    let fields = record(&descriptor).fields();

    assert_eq!(fields[0].tag("avro"), Some("user_name,omitempty"));
    assert_eq!(fields[0].tag("json"), Some("name"));
    assert_eq!(fields[0].wire_name("avro"), Some("user_name"));
    assert_eq!(fields[2].wire_name("avro"), None);
    assert_eq!(fields[1].wire_name("avro"), Some("age"));

    assert!(fields[0].is_exported());
    assert!(!fields[3].is_exported());
}

#[test]
fn test_field_types_resolve() {
    let descriptor = User::describe();
    let fields = record(&descriptor).fields();
    assert!(fields[1].descriptor().is_optional());
    assert!(matches!(fields[1].descriptor().base().kind(), TypeKind::U8));
    assert!(matches!(fields[4].descriptor().kind(), TypeKind::I32));
}

#[test]
fn test_anonymous_struct() {
    let descriptor = Coordinates::describe();
    let coordinates = record(&descriptor);
    assert_eq!(coordinates.name(), None);
    assert_eq!(coordinates.module_path(), None);
    assert_eq!(coordinates.fields().len(), 2);
}

#[test]
fn test_generic_struct() {
    let ints = Page::<i32>::describe();
    let strings = Page::<String>::describe();
    assert_ne!(ints.type_id(), strings.type_id());

    let items = record(&ints).fields()[0].descriptor();
    let TypeKind::Sequence(element) = items.kind() else {
        panic!("expected a sequence");
    };
    assert!(matches!(element.kind(), TypeKind::I32));
}

#[test]
fn test_recursive_struct() {
    let descriptor = Node::describe();
    let fields = record(&descriptor).fields();

    let parent = fields[2].descriptor();
    assert_eq!(parent.base().type_id(), TypeId::of::<Node>());

    let TypeKind::Sequence(child) = fields[1].descriptor().kind().clone() else {
        panic!("expected a sequence");
    };
    assert_eq!(child.type_id(), TypeId::of::<Node>());
}
