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

//! Value shaping between serde's view of a type and its inferred schema.
//!
//! `apache_avro::to_value` produces values that follow serde's data model:
//! struct fields under their declared names, byte vectors as arrays of
//! ints, timestamps as RFC 3339 strings, `u32` as `long`. The inferred
//! schema uses wire names, `bytes`, `timestamp-micros` and `int`.
//! [`to_wire`] bridges the first to the second before encoding and
//! [`from_wire`] reverses it after decoding.

use super::generator::wire_fields;
use crate::describe::{TypeDescriptor, TypeKind};
use apache_avro::types::Value;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// A value that cannot be brought into the shape its schema requires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// An unsigned 32-bit value is too large for an Avro `int`.
    #[error("value {0} does not fit in an avro int")]
    IntOverflow(i64),

    /// A byte sequence holds an element outside `0..=255`.
    #[error("byte sequence element {0} is out of range")]
    ByteOutOfRange(i64),

    /// A serialized struct carries a field the type does not declare, as
    /// happens with `#[serde(rename)]`.
    #[error("field `{field}` of `{record}` is not a declared field; rename with a codec tag instead")]
    UnknownField {
        /// The record's type name
        record: &'static str,
        /// The serialized field name
        field: String,
    },

    /// A required field present in the schema was not serialized.
    #[error("field `{field}` of `{record}` is missing from the serialized value")]
    MissingField {
        /// The record's type name
        record: &'static str,
        /// The declared field name
        field: &'static str,
    },

    /// A timestamp could not be converted.
    #[error("invalid timestamp {value}: {reason}")]
    Timestamp {
        /// The offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Reshapes a serde-produced value into the form of `descriptor`'s schema.
///
/// # Errors
///
/// Returns a [`ShapeError`] when a value cannot be represented.
pub fn to_wire(value: Value, descriptor: &TypeDescriptor, tag_key: &str) -> Result<Value, ShapeError> {
    Ok(match (descriptor.kind(), value) {
        (TypeKind::Optional(inner), Value::Union(index, boxed)) => {
            match to_wire(*boxed, inner, tag_key)? {
                // Option<Option<T>> flattens into one union.
                Value::Union(nested, value) => Value::Union(nested, value),
                value => Value::Union(index, Box::new(value)),
            }
        }
        (TypeKind::Optional(_), Value::Null) => Value::Null,
        (TypeKind::Optional(inner), value) => to_wire(value, inner, tag_key)?,
        (TypeKind::U32, Value::Long(n)) => {
            Value::Int(i32::try_from(n).map_err(|_| ShapeError::IntOverflow(n))?)
        }
        (TypeKind::Sequence(element) | TypeKind::Array { element, .. }, Value::Array(items)) => {
            if element.kind().is_byte() {
                Value::Bytes(to_bytes(items)?)
            } else {
                Value::Array(
                    items
                        .into_iter()
                        .map(|item| to_wire(item, element, tag_key))
                        .collect::<Result<_, _>>()?,
                )
            }
        }
        (TypeKind::Map { key, value: element }, Value::Map(entries)) if key.kind().is_string() => {
            Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| Ok((k, to_wire(v, element, tag_key)?)))
                    .collect::<Result<_, ShapeError>>()?,
            )
        }
        (TypeKind::Struct(record), Value::Record(fields)) => {
            let record_name = descriptor.type_name();
            if let Some((field, _)) = fields
                .iter()
                .find(|(name, _)| record.fields().iter().all(|f| f.name() != name.as_str()))
            {
                return Err(ShapeError::UnknownField {
                    record: record_name,
                    field: field.clone(),
                });
            }
            let mut by_name: HashMap<String, Value> = fields.into_iter().collect();
            let mut shaped = Vec::with_capacity(by_name.len());
            for (field, wire) in wire_fields(record, tag_key) {
                let descriptor = field.descriptor();
                match by_name.remove(field.name()) {
                    Some(value) => {
                        shaped.push((wire.to_string(), to_wire(value, &descriptor, tag_key)?));
                    }
                    // Skipped optionals resolve to the schema's null default.
                    None if descriptor.is_optional() => {}
                    None => {
                        return Err(ShapeError::MissingField {
                            record: record_name,
                            field: field.name(),
                        });
                    }
                }
            }
            Value::Record(shaped)
        }
        (TypeKind::Timestamp, Value::String(text)) => {
            let parsed = DateTime::parse_from_rfc3339(&text).map_err(|e| ShapeError::Timestamp {
                reason: e.to_string(),
                value: text.clone(),
            })?;
            Value::TimestampMicros(parsed.timestamp_micros())
        }
        (_, value) => value,
    })
}

/// Reshapes a decoded value back into serde's view of `descriptor`.
///
/// # Errors
///
/// Returns a [`ShapeError`] when a decoded timestamp is out of range.
pub fn from_wire(value: Value, descriptor: &TypeDescriptor, tag_key: &str) -> Result<Value, ShapeError> {
    Ok(match (descriptor.kind(), value) {
        (TypeKind::Optional(inner), Value::Union(index, boxed)) => {
            Value::Union(index, Box::new(from_wire(*boxed, inner, tag_key)?))
        }
        (TypeKind::Optional(inner), value) => from_wire(value, inner, tag_key)?,
        (TypeKind::Sequence(element) | TypeKind::Array { element, .. }, Value::Bytes(bytes))
            if element.kind().is_byte() =>
        {
            Value::Array(bytes.into_iter().map(|b| Value::Int(i32::from(b))).collect())
        }
        (TypeKind::Sequence(element) | TypeKind::Array { element, .. }, Value::Array(items)) => {
            Value::Array(
                items
                    .into_iter()
                    .map(|item| from_wire(item, element, tag_key))
                    .collect::<Result<_, _>>()?,
            )
        }
        (TypeKind::Map { value: element, .. }, Value::Map(entries)) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| Ok((k, from_wire(v, element, tag_key)?)))
                .collect::<Result<_, ShapeError>>()?,
        ),
        (TypeKind::Struct(record), Value::Record(fields)) => {
            let declared: HashMap<&str, _> = wire_fields(record, tag_key)
                .into_iter()
                .map(|(field, wire)| (wire, field))
                .collect();
            let mut shaped = Vec::with_capacity(fields.len());
            for (wire, value) in fields {
                match declared.get(wire.as_str()) {
                    Some(field) => shaped.push((
                        field.name().to_string(),
                        from_wire(value, &field.descriptor(), tag_key)?,
                    )),
                    None => shaped.push((wire, value)),
                }
            }
            Value::Record(shaped)
        }
        (TypeKind::Timestamp, Value::TimestampMicros(micros) | Value::Long(micros)) => {
            let timestamp =
                DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| ShapeError::Timestamp {
                    value: micros.to_string(),
                    reason: "out of range".to_string(),
                })?;
            Value::String(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        (_, value) => value,
    })
}

fn to_bytes(items: Vec<Value>) -> Result<Vec<u8>, ShapeError> {
    items
        .into_iter()
        .map(|item| {
            let n = match item {
                Value::Int(n) => i64::from(n),
                Value::Long(n) => n,
                _ => -1,
            };
            u8::try_from(n).map_err(|_| ShapeError::ByteOutOfRange(n))
        })
        .collect()
}
