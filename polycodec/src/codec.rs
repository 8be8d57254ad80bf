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

//! The codec abstraction.
//!
//! [`Codec`] is the one interface every format adapter implements, and
//! [`CodecType`] names the formats so they can be picked at runtime.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Wire formats known to this crate.
///
/// The string form of each variant is its tag (`"json"`, `"msgpack"`, ...),
/// which is also the name of the cargo feature that compiles the format in.
///
/// # Examples
///
/// ```rust
/// use polycodec::CodecType;
///
/// let codec: CodecType = "msgpack".parse().unwrap();
/// assert_eq!(codec, CodecType::MsgPack);
/// assert_eq!(codec.to_string(), "msgpack");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    /// JSON text
    Json,
    /// YAML text
    Yaml,
    /// TOML text
    Toml,
    /// MessagePack binary
    MsgPack,
    /// Protocol Buffers binary
    Protobuf,
    /// BSON binary
    Bson,
    /// CBOR binary
    Cbor,
    /// Avro binary with an inferred or explicit schema
    Avro,
}

impl CodecType {
    /// Every format, in declaration order.
    pub const ALL: [CodecType; 8] = [
        CodecType::Json,
        CodecType::Yaml,
        CodecType::Toml,
        CodecType::MsgPack,
        CodecType::Protobuf,
        CodecType::Bson,
        CodecType::Cbor,
        CodecType::Avro,
    ];

    /// Returns the tag of this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CodecType::Json => "json",
            CodecType::Yaml => "yaml",
            CodecType::Toml => "toml",
            CodecType::MsgPack => "msgpack",
            CodecType::Protobuf => "protobuf",
            CodecType::Bson => "bson",
            CodecType::Cbor => "cbor",
            CodecType::Avro => "avro",
        }
    }

    /// Returns `true` for human-readable formats.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, CodecType::Json | CodecType::Yaml | CodecType::Toml)
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when parsing an unknown format tag.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown codec type: {0:?}")]
pub struct ParseCodecTypeError(pub String);

impl FromStr for CodecType {
    type Err = ParseCodecTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodecType::ALL
            .into_iter()
            .find(|codec| codec.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCodecTypeError(s.to_string()))
    }
}

/// Encodes and decodes values of type `T` in one wire format.
///
/// Streaming methods work on any [`Write`]/[`Read`]; the byte-buffer methods
/// are conveniences over in-memory data. Implementations never retry and
/// never swallow errors.
///
/// The trait is object safe, so the factory can hand out
/// `Box<dyn Codec<T>>` for a format chosen at runtime.
///
/// # Examples
///
/// ```rust
/// use polycodec::{Codec, CodecType};
/// use polycodec::formats::JsonCodec;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// # fn example() -> Result<(), polycodec::CodecError> {
/// let codec = JsonCodec::<Point>::new();
/// let bytes = codec.marshal(&Point { x: 1, y: 2 })?;
/// assert_eq!(codec.unmarshal(&bytes)?, Point { x: 1, y: 2 });
/// assert_eq!(codec.codec_type(), CodecType::Json);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub trait Codec<T>: Send + Sync {
    /// Returns the format implemented by this codec.
    fn codec_type(&self) -> CodecType;

    /// Serializes `value` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Serialization`] if the format rejects the value
    /// and [`CodecError::Io`] if the writer fails.
    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError>;

    /// Deserializes one value from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Deserialization`] for malformed or truncated
    /// input and [`CodecError::Io`] if the reader fails.
    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError>;

    /// Serializes `value` to a new byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Serialization`] if the format rejects the value.
    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserializes a value from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Deserialization`] for malformed or truncated input.
    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

impl<T, C> Codec<T> for Box<C>
where
    C: Codec<T> + ?Sized,
{
    fn codec_type(&self) -> CodecType {
        (**self).codec_type()
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        (**self).encode(writer, value)
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        (**self).decode(reader)
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        (**self).marshal(value)
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        (**self).unmarshal(bytes)
    }
}
