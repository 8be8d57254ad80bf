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

//! The schema-bound Avro codec.

use super::cache::SchemaRegistry;
use super::shape::{from_wire, to_wire};
use crate::codec::{Codec, CodecType};
use crate::describe::{Describe, TypeDescriptor};
use crate::error::{BoxError, CodecError};
use apache_avro::Schema;
use apache_avro::schema::UnionSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// Avro codec bound to one schema.
///
/// Values are written as single Avro datums (no container file header, no
/// embedded schema), so both sides must agree on the schema out of band.
///
/// The schema is either inferred from `T`'s [`Describe`] implementation
/// through a [`SchemaRegistry`], or supplied explicitly with
/// [`with_schema`](Self::with_schema).
///
/// Struct fields are matched to the schema by their declared names, so a
/// `#[serde(rename)]` on an inferred type makes encoding fail with
/// [`CodecError::Serialization`]; use `#[codec(avro = "...")]` to rename.
/// Map entries are written in hash order, which makes the encoding of a
/// value containing a map non-deterministic byte-wise.
///
/// # Examples
///
/// ```rust
/// use polycodec::{AvroCodec, Codec, Describe};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Describe, Debug, PartialEq)]
/// pub struct User {
///     #[codec(avro = "user_name")]
///     pub name: String,
///     pub age: Option<i32>,
/// }
///
/// # fn example() -> Result<(), polycodec::CodecError> {
/// let codec = AvroCodec::<User>::new();
/// assert!(codec.schema_text().contains(r#""name":"user_name""#));
///
/// let user = User { name: "ada".into(), age: Some(36) };
/// let bytes = codec.marshal(&user)?;
/// assert_eq!(codec.unmarshal(&bytes)?, user);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct AvroCodec<T> {
    schema: Arc<Schema>,
    descriptor: Option<TypeDescriptor>,
    tag_key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Describe> AvroCodec<T> {
    /// Creates a codec whose schema is inferred through the global registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(SchemaRegistry::global())
    }

    /// Creates a codec whose schema is inferred through `registry`.
    ///
    /// When `T` is itself an `Option`, the cached base schema is wrapped in a
    /// `["null", base]` union.
    #[must_use]
    pub fn with_registry(registry: &SchemaRegistry) -> Self {
        let descriptor = T::describe();
        let base = registry.get_or_create(&descriptor);
        let schema = if descriptor.is_optional() {
            nullable(base)
        } else {
            base
        };
        trace!(type_name = descriptor.type_name(), "created avro codec");
        Self {
            schema,
            descriptor: Some(descriptor),
            tag_key: registry.config().tag_key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> AvroCodec<T> {
    /// Creates a codec from an explicit schema in Avro JSON form.
    ///
    /// Values are mapped to the schema by serde field names alone.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::SchemaParse`] if `schema` is not a valid Avro
    /// schema.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polycodec::{AvroCodec, CodecError};
    ///
    /// let codec = AvroCodec::<i64>::with_schema(r#""long""#).unwrap();
    /// assert_eq!(codec.schema_text(), r#""long""#);
    ///
    /// let error = AvroCodec::<i64>::with_schema("{not json").unwrap_err();
    /// assert!(matches!(error, CodecError::SchemaParse { .. }));
    /// ```
    pub fn with_schema(schema: &str) -> Result<Self, CodecError> {
        let schema =
            Schema::parse_str(schema).map_err(|e| CodecError::schema_parse(CodecType::Avro, e))?;
        Ok(Self {
            schema: Arc::new(schema),
            descriptor: None,
            tag_key: String::new(),
            _marker: PhantomData,
        })
    }

    /// Returns the schema values are written with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the full JSON text of the schema.
    pub fn schema_text(&self) -> String {
        serde_json::to_string(&*self.schema).unwrap_or_else(|_| self.schema.canonical_form())
    }

    fn to_datum(&self, value: &T) -> Result<Vec<u8>, CodecError>
    where
        T: Serialize,
    {
        let error = |e: BoxError| CodecError::serialization(CodecType::Avro, e);
        let mut datum = apache_avro::to_value(value).map_err(|e| error(e.into()))?;
        if let Some(descriptor) = &self.descriptor {
            datum = to_wire(datum, descriptor, &self.tag_key).map_err(|e| error(e.into()))?;
        }
        let datum = datum.resolve(&self.schema).map_err(|e| error(e.into()))?;
        apache_avro::to_avro_datum(&self.schema, datum).map_err(|e| error(e.into()))
    }

    fn from_datum(&self, reader: &mut dyn Read) -> Result<T, CodecError>
    where
        T: DeserializeOwned,
    {
        let error = |e: BoxError| CodecError::deserialization(CodecType::Avro, e);
        let mut reader = reader;
        let mut datum = apache_avro::from_avro_datum(&self.schema, &mut reader, None)
            .map_err(|e| error(e.into()))?;
        if let Some(descriptor) = &self.descriptor {
            datum = from_wire(datum, descriptor, &self.tag_key).map_err(|e| error(e.into()))?;
        }
        apache_avro::from_value(&datum).map_err(|e| error(e.into()))
    }
}

impl<T: Describe> Default for AvroCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for AvroCodec<T> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            descriptor: self.descriptor.clone(),
            tag_key: self.tag_key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for AvroCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvroCodec")
            .field("schema", &self.schema.canonical_form())
            .field("inferred", &self.descriptor.is_some())
            .finish()
    }
}

impl<T> Codec<T> for AvroCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn codec_type(&self) -> CodecType {
        CodecType::Avro
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        let bytes = self.to_datum(value)?;
        writer
            .write_all(&bytes)
            .map_err(|e| CodecError::io(CodecType::Avro, e))
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        self.from_datum(reader)
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        self.to_datum(value)
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let mut bytes = bytes;
        self.from_datum(&mut bytes)
    }
}

fn nullable(base: Arc<Schema>) -> Arc<Schema> {
    if matches!(*base, Schema::Null | Schema::Union(_)) {
        return base;
    }
    match UnionSchema::new(vec![Schema::Null, (*base).clone()]) {
        Ok(union) => Arc::new(Schema::Union(union)),
        Err(_) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_top_level_schema() {
        let registry = SchemaRegistry::new();
        let codec = AvroCodec::<Option<String>>::with_registry(&registry);
        assert_eq!(codec.schema().canonical_form(), r#"["null","string"]"#);

        // the cache keeps the base schema
        assert_eq!(registry.schema_for::<String>().canonical_form(), r#""string""#);
    }

    #[test]
    fn test_optional_round_trip() {
        let codec = AvroCodec::<Option<i64>>::with_registry(&SchemaRegistry::new());
        for value in [None, Some(-5), Some(i64::MAX)] {
            let bytes = codec.marshal(&value).unwrap();
            assert_eq!(codec.unmarshal(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn test_bytes_and_u32() {
        let registry = SchemaRegistry::new();
        let bytes_codec = AvroCodec::<Vec<u8>>::with_registry(&registry);
        let encoded = bytes_codec.marshal(&vec![0, 1, 254, 255]).unwrap();
        // length 4 as a zigzag varint, then the raw bytes
        assert_eq!(encoded, [8, 0, 1, 254, 255]);
        assert_eq!(bytes_codec.unmarshal(&encoded).unwrap(), vec![0, 1, 254, 255]);

        let int_codec = AvroCodec::<u32>::with_registry(&registry);
        let encoded = int_codec.marshal(&70_000).unwrap();
        assert_eq!(int_codec.unmarshal(&encoded).unwrap(), 70_000);
        assert!(matches!(
            int_codec.marshal(&u32::MAX),
            Err(CodecError::Serialization { .. })
        ));
    }

    #[test]
    fn test_explicit_schema_round_trip() {
        let codec = AvroCodec::<Vec<String>>::with_schema(
            r#"{"type": "array", "items": "string"}"#,
        )
        .unwrap();
        let value = vec!["a".to_string(), "b".to_string()];

        let mut out = Vec::new();
        codec.encode(&mut out, &value).unwrap();
        assert_eq!(codec.decode(&mut out.as_slice()).unwrap(), value);
    }

    #[test]
    fn test_truncated_input() {
        let codec = AvroCodec::<String>::with_registry(&SchemaRegistry::new());
        let bytes = codec.marshal(&"hello".to_string()).unwrap();
        let error = codec.unmarshal(&bytes[..3]).unwrap_err();
        assert!(matches!(
            error,
            CodecError::Deserialization {
                codec: CodecType::Avro,
                ..
            }
        ));
    }
}
