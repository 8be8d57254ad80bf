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

//! Schema generation from type descriptors.
//!
//! The generator builds the JSON form of an Avro schema and hands it to
//! [`Schema::parse`]. Kind mapping:
//!
//! | Kind | Schema |
//! |------|--------|
//! | `Bool` | `boolean` |
//! | `I64`, `Isize`, `U64`, `Usize` | `long` |
//! | `I8`, `I16`, `I32`, `U8`, `U16`, `U32` | `int` |
//! | `F32` / `F64` | `float` / `double` |
//! | `String` | `string` |
//! | sequence or array of `u8` | `bytes` |
//! | other sequence or array | `array` |
//! | map with `String` keys | `map` |
//! | map with other keys | `string` |
//! | `Struct` | `record` |
//! | `Optional` | `["null", inner]` |
//! | `Timestamp` | `long` / `timestamp-micros` |
//! | `Unit` | `null` |
//! | `Any`, `Opaque` | `string` |

use super::config::SchemaConfig;
use crate::describe::{FieldDescriptor, StructDescriptor, TypeDescriptor, TypeKind};
use apache_avro::Schema;
use serde_json::{Value, json};
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Returns `true` if `name` is a valid Avro name: `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Converts a module path into an Avro namespace.
///
/// `::` and `/` become `.`, `-` becomes `_`.
#[must_use]
pub fn namespace_of(module_path: &str) -> String {
    module_path
        .replace("::", ".")
        .replace('/', ".")
        .replace('-', "_")
}

/// Returns the fields of `record` that appear on the wire, paired with
/// their wire names.
///
/// Private fields, fields tagged `-`, fields whose wire name is not a valid
/// Avro name and fields repeating an earlier wire name are left out.
pub fn wire_fields<'a>(
    record: &'a StructDescriptor,
    tag_key: &str,
) -> Vec<(&'a FieldDescriptor, &'static str)> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(record.fields().len());
    for field in record.fields() {
        if !field.is_exported() {
            continue;
        }
        let Some(wire) = field.wire_name(tag_key) else {
            continue;
        };
        if !is_valid_name(wire) {
            debug!(field = field.name(), wire, "skipping field with invalid avro name");
            continue;
        }
        if !seen.insert(wire) {
            debug!(field = field.name(), wire, "skipping field with duplicate avro name");
            continue;
        }
        fields.push((field, wire));
    }
    fields
}

/// Walks one type descriptor, producing its schema.
///
/// Records are remembered by type identity so a record met again, whether
/// through recursion or repetition, becomes a reference to its full name.
pub(crate) struct Generator<'a> {
    config: &'a SchemaConfig,
    anonymous: &'a AtomicU64,
    records: HashMap<TypeId, String>,
    fullnames: HashSet<String>,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(config: &'a SchemaConfig, anonymous: &'a AtomicU64) -> Self {
        Self {
            config,
            anonymous,
            records: HashMap::new(),
            fullnames: HashSet::new(),
        }
    }

    /// Generates and parses the schema of `descriptor`.
    ///
    /// Never fails: a schema the parser rejects degrades to `string`.
    pub(crate) fn generate(mut self, descriptor: &TypeDescriptor) -> Schema {
        let json = self.schema_json(descriptor);
        match Schema::parse(&json) {
            Ok(schema) => schema,
            Err(error) => {
                warn!(
                    type_name = descriptor.type_name(),
                    %error,
                    "generated avro schema failed to parse; falling back to string"
                );
                Schema::String
            }
        }
    }

    fn schema_json(&mut self, descriptor: &TypeDescriptor) -> Value {
        match descriptor.kind() {
            TypeKind::Optional(inner) => nullable(self.schema_json(inner)),
            TypeKind::Bool => json!("boolean"),
            TypeKind::I64 | TypeKind::Isize | TypeKind::U64 | TypeKind::Usize => json!("long"),
            TypeKind::I8
            | TypeKind::I16
            | TypeKind::I32
            | TypeKind::U8
            | TypeKind::U16
            | TypeKind::U32 => json!("int"),
            TypeKind::F32 => json!("float"),
            TypeKind::F64 => json!("double"),
            TypeKind::String => json!("string"),
            TypeKind::Sequence(element) | TypeKind::Array { element, .. } => {
                if element.kind().is_byte() {
                    json!("bytes")
                } else {
                    json!({ "type": "array", "items": self.schema_json(element) })
                }
            }
            TypeKind::Map { key, value } => {
                if key.kind().is_string() {
                    json!({ "type": "map", "values": self.schema_json(value) })
                } else {
                    json!("string")
                }
            }
            TypeKind::Struct(record) => self.record_json(descriptor, record),
            TypeKind::Timestamp => json!({ "type": "long", "logicalType": "timestamp-micros" }),
            TypeKind::Unit => json!("null"),
            TypeKind::Any | TypeKind::Opaque(_) => json!("string"),
        }
    }

    fn record_json(&mut self, descriptor: &TypeDescriptor, record: &StructDescriptor) -> Value {
        if let Some(fullname) = self.records.get(&descriptor.type_id()) {
            return json!(fullname);
        }

        let name = match record.name() {
            Some(name) => name.to_string(),
            None => format!(
                "{}{}",
                self.config.anonymous_prefix,
                self.anonymous.fetch_add(1, Ordering::Relaxed) + 1
            ),
        };
        let namespace = record
            .module_path()
            .map(namespace_of)
            .unwrap_or_else(|| self.config.default_namespace.clone());
        let name = self.unique_name(name, &namespace);
        let fullname = format!("{namespace}.{name}");
        self.records.insert(descriptor.type_id(), fullname);

        let fields: Vec<Value> = wire_fields(record, &self.config.tag_key)
            .into_iter()
            .map(|(field, wire)| {
                let field_type = field.descriptor();
                let mut entry = json!({ "name": wire, "type": self.schema_json(&field_type) });
                if field_type.is_optional() {
                    entry["default"] = Value::Null;
                }
                entry
            })
            .collect();

        json!({
            "type": "record",
            "name": name,
            "namespace": namespace,
            "fields": fields,
        })
    }

    // Distinct types may share a name, e.g. two instantiations of one
    // generic struct. Later ones get a numeric suffix.
    fn unique_name(&mut self, name: String, namespace: &str) -> String {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while !self.fullnames.insert(format!("{namespace}.{candidate}")) {
            suffix += 1;
            candidate = format!("{name}_{suffix}");
        }
        candidate
    }
}

/// Wraps `inner` in a `["null", inner]` union unless it already admits null.
fn nullable(inner: Value) -> Value {
    match inner {
        Value::String(ref s) if s == "null" => inner,
        Value::Array(ref branches) if branches.first() == Some(&json!("null")) => inner,
        other => json!(["null", other]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::Describe;

    fn generate(descriptor: &TypeDescriptor) -> Schema {
        let config = SchemaConfig::default();
        let counter = AtomicU64::new(0);
        Generator::new(&config, &counter).generate(descriptor)
    }

    fn canonical<T: Describe>() -> String {
        generate(&T::describe()).canonical_form()
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("a"));
        assert!(is_valid_name("_x9"));
        assert!(is_valid_name("Snake_Case_2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("9lives"));
        assert!(!is_valid_name("has-dash"));
        assert!(!is_valid_name("dotted.name"));
        assert!(!is_valid_name("ünïcode"));
    }

    #[test]
    fn test_namespace_conversion() {
        assert_eq!(namespace_of("my_crate::models"), "my_crate.models");
        assert_eq!(namespace_of("github.com/acme/go-lib"), "github.com.acme.go_lib");
    }

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(canonical::<bool>(), r#""boolean""#);
        assert_eq!(canonical::<i8>(), r#""int""#);
        assert_eq!(canonical::<u32>(), r#""int""#);
        assert_eq!(canonical::<i64>(), r#""long""#);
        assert_eq!(canonical::<usize>(), r#""long""#);
        assert_eq!(canonical::<f32>(), r#""float""#);
        assert_eq!(canonical::<f64>(), r#""double""#);
        assert_eq!(canonical::<char>(), r#""string""#);
        assert_eq!(canonical::<()>(), r#""null""#);
        assert_eq!(canonical::<serde_json::Value>(), r#""string""#);
        assert_eq!(canonical::<std::time::Duration>(), r#""string""#);
    }

    #[test]
    fn test_collection_mapping() {
        assert_eq!(canonical::<Vec<u8>>(), r#""bytes""#);
        assert_eq!(canonical::<[u8; 16]>(), r#""bytes""#);
        assert_eq!(canonical::<Vec<i16>>(), r#"{"type":"array","items":"int"}"#);
        assert_eq!(
            canonical::<std::collections::HashMap<String, f64>>(),
            r#"{"type":"map","values":"double"}"#
        );
        assert_eq!(
            canonical::<std::collections::BTreeMap<u32, f64>>(),
            r#""string""#
        );
    }

    #[test]
    fn test_optional_is_not_double_wrapped() {
        assert_eq!(canonical::<Option<String>>(), r#"["null","string"]"#);
        assert_eq!(canonical::<Option<Option<String>>>(), r#"["null","string"]"#);
        assert_eq!(canonical::<Option<()>>(), r#""null""#);
    }

    #[test]
    fn test_timestamp_is_logical_long() {
        let schema = generate(&chrono::DateTime::<chrono::Utc>::describe());
        assert!(matches!(schema, Schema::TimestampMicros));
    }

    #[test]
    fn test_nullable_helper() {
        assert_eq!(nullable(json!("int")), json!(["null", "int"]));
        assert_eq!(nullable(json!(["null", "int"])), json!(["null", "int"]));
        assert_eq!(nullable(json!("null")), json!("null"));
    }
}
