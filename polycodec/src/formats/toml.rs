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

//! TOML adapter.

use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// TOML codec backed by the `toml` crate.
///
/// TOML documents are tables, so only values that serialize as a map or
/// struct can be encoded; anything else is a
/// [`CodecError::Serialization`]. Input must be valid UTF-8.
///
/// ```rust
/// use polycodec::Codec;
/// use polycodec::formats::TomlCodec;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// # fn example() -> Result<(), polycodec::CodecError> {
/// let codec = TomlCodec::<Server>::new();
/// let bytes = codec.marshal(&Server { host: "localhost".into(), port: 8080 })?;
/// assert_eq!(String::from_utf8_lossy(&bytes), "host = \"localhost\"\nport = 8080\n");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug)]
pub struct TomlCodec<T> {
    pretty: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TomlCodec<T> {
    /// Creates a TOML codec with the default layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            _marker: PhantomData,
        }
    }

    /// Uses the pretty layout (multi-line arrays).
    #[must_use]
    pub fn with_pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render(&self, value: &T) -> Result<String, CodecError>
    where
        T: Serialize,
    {
        let result = if self.pretty {
            ::toml::to_string_pretty(value)
        } else {
            ::toml::to_string(value)
        };
        result.map_err(|e| CodecError::serialization(CodecType::Toml, e))
    }
}

impl<T> Default for TomlCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TomlCodec<T> {
    fn clone(&self) -> Self {
        Self {
            pretty: self.pretty,
            _marker: PhantomData,
        }
    }
}

impl<T> Codec<T> for TomlCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn codec_type(&self) -> CodecType {
        CodecType::Toml
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        let text = self.render(value)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|e| CodecError::io(CodecType::Toml, e))
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                CodecError::deserialization(CodecType::Toml, e)
            } else {
                CodecError::io(CodecType::Toml, e)
            }
        })?;
        ::toml::from_str(&text).map_err(|e| CodecError::deserialization(CodecType::Toml, e))
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        self.render(value).map(String::into_bytes)
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CodecError::deserialization(CodecType::Toml, e))?;
        ::toml::from_str(text).map_err(|e| CodecError::deserialization(CodecType::Toml, e))
    }
}
