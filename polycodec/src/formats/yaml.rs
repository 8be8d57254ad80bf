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

//! YAML adapter.

use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// YAML codec backed by `serde_yaml`.
///
/// Streaming decode consumes the whole reader and expects a single document.
#[derive(Debug)]
pub struct YamlCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> YamlCodec<T> {
    /// Creates a YAML codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for YamlCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for YamlCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Codec<T> for YamlCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn codec_type(&self) -> CodecType {
        CodecType::Yaml
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        serde_yaml::to_writer(writer, value)
            .map_err(|e| CodecError::serialization(CodecType::Yaml, e))
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        serde_yaml::from_reader(reader).map_err(|e| CodecError::deserialization(CodecType::Yaml, e))
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| CodecError::serialization(CodecType::Yaml, e))
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_yaml::from_slice(bytes).map_err(|e| CodecError::deserialization(CodecType::Yaml, e))
    }
}
