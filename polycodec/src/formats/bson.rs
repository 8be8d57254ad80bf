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

//! BSON adapter.

use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// BSON codec backed by the `bson` crate.
///
/// BSON documents must be maps at the top level. Unsigned integers that do
/// not fit in an `i64` cannot be represented and fail to encode.
#[derive(Debug)]
pub struct BsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> BsonCodec<T> {
    /// Creates a BSON codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for BsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BsonCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Codec<T> for BsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn codec_type(&self) -> CodecType {
        CodecType::Bson
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        let bytes = self.marshal(value)?;
        writer
            .write_all(&bytes)
            .map_err(|e| CodecError::io(CodecType::Bson, e))
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| CodecError::io(CodecType::Bson, e))?;
        self.unmarshal(&bytes)
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        ::bson::to_vec(value).map_err(|e| CodecError::serialization(CodecType::Bson, e))
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        ::bson::from_slice(bytes).map_err(|e| CodecError::deserialization(CodecType::Bson, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Document {
        title: String,
        pages: i32,
        tags: Vec<String>,
        draft: bool,
    }

    fn document() -> Document {
        Document {
            title: "Notes".into(),
            pages: 12,
            tags: vec!["a".into()],
            draft: false,
        }
    }

    #[test]
    fn test_bson_length_prefix() {
        let bytes = BsonCodec::new().marshal(&document()).unwrap();
        let declared = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(declared as usize, bytes.len());
        assert_eq!(bytes.last(), Some(&0));
    }

    #[test]
    fn test_bson_stream() {
        let codec = BsonCodec::new();
        let mut out = Vec::new();
        codec.encode(&mut out, &document()).unwrap();
        assert_eq!(codec.decode(&mut out.as_slice()).unwrap(), document());
    }

    #[test]
    fn test_bson_truncated() {
        let codec = BsonCodec::<Document>::new();
        let bytes = codec.marshal(&document()).unwrap();
        let error = codec.unmarshal(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(
            error,
            CodecError::Deserialization {
                codec: CodecType::Bson,
                ..
            }
        ));
    }
}
