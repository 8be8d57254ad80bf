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

//! CBOR adapter.

use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// CBOR codec backed by `ciborium`.
#[derive(Debug)]
pub struct CborCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> CborCodec<T> {
    /// Creates a CBOR codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for CborCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CborCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn encode_error(e: ciborium::ser::Error<std::io::Error>) -> CodecError {
    match e {
        ciborium::ser::Error::Io(io) => CodecError::io(CodecType::Cbor, io),
        other => CodecError::serialization(CodecType::Cbor, other),
    }
}

// Running out of input is a truncated document, not a failing reader.
fn decode_error(e: ciborium::de::Error<std::io::Error>) -> CodecError {
    match e {
        ciborium::de::Error::Io(io) if io.kind() != std::io::ErrorKind::UnexpectedEof => {
            CodecError::io(CodecType::Cbor, io)
        }
        other => CodecError::deserialization(CodecType::Cbor, other),
    }
}

impl<T> Codec<T> for CborCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn codec_type(&self) -> CodecType {
        CodecType::Cbor
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        ciborium::into_writer(value, writer).map_err(encode_error)
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        ciborium::from_reader(reader).map_err(decode_error)
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        ciborium::into_writer(value, &mut out).map_err(encode_error)?;
        Ok(out)
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        ciborium::from_reader(bytes).map_err(decode_error)
    }
}
