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

//! Protocol Buffers adapter.

use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// Protocol Buffers codec backed by `prost`.
///
/// Works only with generated message types (`prost-build` output or
/// `#[derive(prost::Message)]`); arbitrary serde types cannot be encoded as
/// protobuf, which is why the generic factory refuses this format and
/// [`new_protobuf`](crate::new_protobuf) exists.
///
/// # Examples
///
/// ```rust
/// use polycodec::Codec;
/// use polycodec::formats::ProtobufCodec;
///
/// #[derive(Clone, PartialEq, prost::Message)]
/// struct Ping {
///     #[prost(uint64, tag = "1")]
///     seq: u64,
/// }
///
/// # fn example() -> Result<(), polycodec::CodecError> {
/// let codec = ProtobufCodec::<Ping>::new();
/// let bytes = codec.marshal(&Ping { seq: 150 })?;
/// assert_eq!(bytes, [0x08, 0x96, 0x01]);
/// assert_eq!(codec.unmarshal(&bytes)?, Ping { seq: 150 });
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug)]
pub struct ProtobufCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ProtobufCodec<T>
where
    T: prost::Message + Default,
{
    /// Creates a protobuf codec for message type `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ProtobufCodec<T>
where
    T: prost::Message + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ProtobufCodec<T> {
    fn clone(&self) -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Codec<T> for ProtobufCodec<T>
where
    T: prost::Message + Default,
{
    fn codec_type(&self) -> CodecType {
        CodecType::Protobuf
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        writer
            .write_all(&value.encode_to_vec())
            .map_err(|e| CodecError::io(CodecType::Protobuf, e))
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| CodecError::io(CodecType::Protobuf, e))?;
        self.unmarshal(&bytes)
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(value.encode_to_vec())
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        T::decode(bytes).map_err(|e| CodecError::deserialization(CodecType::Protobuf, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, prost::Message)]
    struct Order {
        #[prost(string, tag = "1")]
        id: String,
        #[prost(uint32, tag = "2")]
        quantity: u32,
        #[prost(string, repeated, tag = "3")]
        items: Vec<String>,
    }

    fn order() -> Order {
        Order {
            id: "o-1".into(),
            quantity: 3,
            items: vec!["apple".into(), "pear".into()],
        }
    }

    #[test]
    fn test_protobuf_round_trip() {
        let codec = ProtobufCodec::new();
        let bytes = codec.marshal(&order()).unwrap();
        assert_eq!(codec.unmarshal(&bytes).unwrap(), order());
    }

    #[test]
    fn test_protobuf_stream() {
        let codec = ProtobufCodec::new();
        let mut out = Vec::new();
        codec.encode(&mut out, &order()).unwrap();
        assert_eq!(codec.decode(&mut out.as_slice()).unwrap(), order());
    }

    #[test]
    fn test_protobuf_default_message_is_empty() {
        let bytes = ProtobufCodec::new().marshal(&Order::default()).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_protobuf_truncated() {
        let codec = ProtobufCodec::<Order>::new();
        let bytes = codec.marshal(&order()).unwrap();
        let error = codec.unmarshal(&bytes[..bytes.len() - 2]).unwrap_err();
        assert!(matches!(
            error,
            CodecError::Deserialization {
                codec: CodecType::Protobuf,
                ..
            }
        ));
    }
}
