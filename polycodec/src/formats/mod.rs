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

//! Format adapters.
//!
//! Each adapter is a zero-sized (or nearly so) handle that implements
//! [`Codec<T>`](crate::Codec) by delegating to one serialization library.
//! Adapters are compiled in by cargo feature:
//!
//! | Adapter | Feature | Library |
//! |---------|---------|---------|
//! | [`JsonCodec`] | `json` | `serde_json` |
//! | [`YamlCodec`] | `yaml` | `serde_yaml` |
//! | [`TomlCodec`] | `toml` | `toml` |
//! | [`MsgPackCodec`] | `msgpack` | `rmp-serde` |
//! | [`BsonCodec`] | `bson` | `bson` |
//! | [`CborCodec`] | `cbor` | `ciborium` |
//! | [`AvroCodec`](crate::AvroCodec) | `avro` | `apache-avro` |
//! | [`ProtobufCodec`] | `protobuf` | `prost` |
//!
//! [`PooledCodec`] wraps any of them to encode through the shared
//! [`BufferPool`](crate::BufferPool).

use crate::registry::CodecRegistry;

#[cfg(feature = "bson")]
mod bson;
#[cfg(feature = "cbor")]
mod cbor;
#[cfg(feature = "json")]
mod json;
#[cfg(feature = "msgpack")]
mod msgpack;
mod pooled;
#[cfg(feature = "protobuf")]
mod protobuf;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

#[cfg(feature = "bson")]
pub use self::bson::BsonCodec;
#[cfg(feature = "cbor")]
pub use self::cbor::CborCodec;
#[cfg(feature = "json")]
pub use self::json::JsonCodec;
#[cfg(feature = "msgpack")]
pub use self::msgpack::MsgPackCodec;
pub use self::pooled::PooledCodec;
#[cfg(feature = "protobuf")]
pub use self::protobuf::ProtobufCodec;
#[cfg(feature = "toml")]
pub use self::toml::TomlCodec;
#[cfg(feature = "yaml")]
pub use self::yaml::YamlCodec;

/// Registers every format compiled into this build with `registry`.
#[allow(unused_variables)]
pub(crate) fn register_builtin(registry: &CodecRegistry) {
    #[cfg(feature = "json")]
    registry.register(crate::CodecType::Json);
    #[cfg(feature = "yaml")]
    registry.register(crate::CodecType::Yaml);
    #[cfg(feature = "toml")]
    registry.register(crate::CodecType::Toml);
    #[cfg(feature = "msgpack")]
    registry.register(crate::CodecType::MsgPack);
    #[cfg(feature = "bson")]
    registry.register(crate::CodecType::Bson);
    #[cfg(feature = "cbor")]
    registry.register(crate::CodecType::Cbor);
    #[cfg(feature = "avro")]
    registry.register(crate::CodecType::Avro);
    #[cfg(feature = "protobuf")]
    registry.register(crate::CodecType::Protobuf);
}
