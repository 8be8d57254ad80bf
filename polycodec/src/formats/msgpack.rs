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

//! MessagePack adapter.

use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// MessagePack codec backed by `rmp-serde`.
///
/// Structs are written as maps keyed by field name rather than positional
/// arrays, so payloads stay readable by other MessagePack implementations
/// and survive field reordering.
#[derive(Debug)]
pub struct MsgPackCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> MsgPackCodec<T> {
    /// Creates a MessagePack codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for MsgPackCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MsgPackCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Codec<T> for MsgPackCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn codec_type(&self) -> CodecType {
        CodecType::MsgPack
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        rmp_serde::encode::write_named(writer, value)
            .map_err(|e| CodecError::serialization(CodecType::MsgPack, e))
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        rmp_serde::from_read(reader).map_err(|e| CodecError::deserialization(CodecType::MsgPack, e))
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec_named(value).map_err(|e| CodecError::serialization(CodecType::MsgPack, e))
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        rmp_serde::from_slice(bytes).map_err(|e| CodecError::deserialization(CodecType::MsgPack, e))
    }
}
