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

//! Runtime codec selection.
//!
//! [`CodecFactory`] turns a [`CodecType`] chosen at runtime into a boxed
//! [`Codec`]. It consults a [`CodecRegistry`] first, so a format that was
//! compiled out (or unregistered) yields [`CodecError::NotSupported`]
//! rather than a codec.
//!
//! ```rust
//! use polycodec::{Codec, CodecType, Describe};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Describe, Debug, PartialEq)]
//! pub struct Order {
//!     pub id: String,
//!     pub quantity: i32,
//! }
//!
//! # fn example() -> Result<(), polycodec::CodecError> {
//! let order = Order { id: "o-1".into(), quantity: 2 };
//! for tag in ["json", "msgpack", "avro"] {
//!     let codec = polycodec::new::<Order>(tag.parse().unwrap())?;
//!     let bytes = codec.marshal(&order)?;
//!     assert_eq!(codec.unmarshal(&bytes)?, order);
//! }
//!
//! let error = polycodec::new::<Order>(CodecType::Protobuf).err().unwrap();
//! assert!(matches!(error, polycodec::CodecError::InvalidConstruction { .. }));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::codec::{Codec, CodecType};
use crate::describe::Describe;
use crate::error::CodecError;
use crate::formats::PooledCodec;
use crate::registry::CodecRegistry;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, OnceLock};
use tracing::trace;

#[cfg(feature = "avro")]
use crate::avro::SchemaRegistry;

/// Builds codecs for formats chosen at runtime.
///
/// Cloning is cheap; clones share the same registries.
#[derive(Clone, Debug)]
pub struct CodecFactory {
    codecs: Arc<CodecRegistry>,
    #[cfg(feature = "avro")]
    schemas: Arc<SchemaRegistry>,
}

impl CodecFactory {
    /// Creates a factory over the global codec and schema registries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            codecs: Arc::clone(CodecRegistry::global()),
            #[cfg(feature = "avro")]
            schemas: Arc::clone(SchemaRegistry::global()),
        }
    }

    /// Returns the process-wide factory.
    pub fn global() -> &'static CodecFactory {
        static INSTANCE: OnceLock<CodecFactory> = OnceLock::new();
        INSTANCE.get_or_init(CodecFactory::new)
    }

    /// Replaces the codec registry consulted by this factory.
    #[must_use]
    pub fn with_codec_registry(mut self, codecs: Arc<CodecRegistry>) -> Self {
        self.codecs = codecs;
        self
    }

    /// Replaces the schema registry Avro codecs infer through.
    #[cfg(feature = "avro")]
    #[must_use]
    pub fn with_schema_registry(mut self, schemas: Arc<SchemaRegistry>) -> Self {
        self.schemas = schemas;
        self
    }

    /// Returns the codec registry.
    pub fn codec_registry(&self) -> &Arc<CodecRegistry> {
        &self.codecs
    }

    /// Returns the schema registry.
    #[cfg(feature = "avro")]
    pub fn schema_registry(&self) -> &Arc<SchemaRegistry> {
        &self.schemas
    }

    /// Creates a codec for `codec`.
    ///
    /// The format is only known at runtime, so `T` must implement
    /// [`Describe`] for every format, not just Avro. Types without it can
    /// use the adapters in [`formats`](crate::formats) directly:
    ///
    /// ```rust
    /// use polycodec::Codec;
    /// use polycodec::formats::YamlCodec;
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize, Deserialize, Debug, PartialEq)]
    /// struct Plain {
    ///     id: u32,
    /// }
    ///
    /// # fn example() -> Result<(), polycodec::CodecError> {
    /// let codec = YamlCodec::<Plain>::new();
    /// let bytes = codec.marshal(&Plain { id: 1 })?;
    /// assert_eq!(codec.unmarshal(&bytes)?, Plain { id: 1 });
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// - [`CodecError::NotSupported`] if the format is not registered.
    /// - [`CodecError::InvalidConstruction`] for [`CodecType::Protobuf`],
    ///   which needs a generated message type; use
    ///   [`create_protobuf`](Self::create_protobuf).
    #[allow(unreachable_patterns)]
    pub fn create<T>(&self, codec: CodecType) -> Result<Box<dyn Codec<T>>, CodecError>
    where
        T: Serialize + DeserializeOwned + Describe,
    {
        if !self.codecs.is_supported(codec) {
            return Err(CodecError::NotSupported { codec });
        }
        trace!(codec = %codec, type_name = std::any::type_name::<T>(), "creating codec");

        match codec {
            #[cfg(feature = "json")]
            CodecType::Json => Ok(Box::new(crate::formats::JsonCodec::<T>::new())),
            #[cfg(feature = "yaml")]
            CodecType::Yaml => Ok(Box::new(crate::formats::YamlCodec::<T>::new())),
            #[cfg(feature = "toml")]
            CodecType::Toml => Ok(Box::new(crate::formats::TomlCodec::<T>::new())),
            #[cfg(feature = "msgpack")]
            CodecType::MsgPack => Ok(Box::new(crate::formats::MsgPackCodec::<T>::new())),
            #[cfg(feature = "bson")]
            CodecType::Bson => Ok(Box::new(crate::formats::BsonCodec::<T>::new())),
            #[cfg(feature = "cbor")]
            CodecType::Cbor => Ok(Box::new(crate::formats::CborCodec::<T>::new())),
            #[cfg(feature = "avro")]
            CodecType::Avro => Ok(Box::new(crate::avro::AvroCodec::<T>::with_registry(
                &self.schemas,
            ))),
            CodecType::Protobuf => Err(CodecError::InvalidConstruction {
                codec,
                reason: "protobuf requires a generated message type; use create_protobuf".into(),
            }),
            // Registered by hand without the feature compiled in.
            _ => Err(CodecError::NotSupported { codec }),
        }
    }

    /// Creates a codec for `codec` that encodes through the global buffer pool.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub fn create_pooled<T>(
        &self,
        codec: CodecType,
    ) -> Result<PooledCodec<T, Box<dyn Codec<T>>>, CodecError>
    where
        T: Serialize + DeserializeOwned + Describe,
    {
        self.create(codec).map(PooledCodec::new)
    }

    /// Creates a protobuf codec for the generated message type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NotSupported`] if protobuf is not registered.
    #[cfg(feature = "protobuf")]
    pub fn create_protobuf<T>(&self) -> Result<crate::formats::ProtobufCodec<T>, CodecError>
    where
        T: prost::Message + Default,
    {
        if !self.codecs.is_supported(CodecType::Protobuf) {
            return Err(CodecError::NotSupported {
                codec: CodecType::Protobuf,
            });
        }
        trace!(type_name = std::any::type_name::<T>(), "creating protobuf codec");
        Ok(crate::formats::ProtobufCodec::new())
    }
}

impl Default for CodecFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a codec for `codec` through the global factory.
///
/// `T` must implement [`Describe`] whichever format is chosen.
///
/// # Errors
///
/// See [`CodecFactory::create`].
pub fn new<T>(codec: CodecType) -> Result<Box<dyn Codec<T>>, CodecError>
where
    T: Serialize + DeserializeOwned + Describe,
{
    CodecFactory::global().create(codec)
}

/// Creates a buffer-pooled codec for `codec` through the global factory.
///
/// # Errors
///
/// See [`CodecFactory::create`].
pub fn new_pooled<T>(codec: CodecType) -> Result<PooledCodec<T, Box<dyn Codec<T>>>, CodecError>
where
    T: Serialize + DeserializeOwned + Describe,
{
    CodecFactory::global().create_pooled(codec)
}

/// Creates a protobuf codec for `T` through the global factory.
///
/// # Errors
///
/// See [`CodecFactory::create_protobuf`].
#[cfg(feature = "protobuf")]
pub fn new_protobuf<T>() -> Result<crate::formats::ProtobufCodec<T>, CodecError>
where
    T: prost::Message + Default,
{
    CodecFactory::global().create_protobuf()
}
