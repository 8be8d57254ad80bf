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

//! JSON adapter.

use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// JSON codec backed by `serde_json`.
///
/// Produces compact JSON by default. Streaming decode reads exactly one
/// JSON value and rejects trailing non-whitespace input.
///
/// # Examples
///
/// ## Basic usage
///
/// ```rust
/// use polycodec::Codec;
/// use polycodec::formats::JsonCodec;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Message {
///     id: u32,
///     text: String,
/// }
///
/// # fn example() -> Result<(), polycodec::CodecError> {
/// let codec = JsonCodec::<Message>::new();
/// let message = Message { id: 42, text: "Hello".to_string() };
///
/// let bytes = codec.marshal(&message)?;
/// assert_eq!(bytes, br#"{"id":42,"text":"Hello"}"#);
/// assert_eq!(codec.unmarshal(&bytes)?, message);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
///
/// ## Pretty-printed JSON
///
/// ```rust
/// use polycodec::Codec;
/// use polycodec::formats::JsonCodec;
///
/// # fn example() -> Result<(), polycodec::CodecError> {
/// let codec = JsonCodec::<Vec<u16>>::new().with_pretty_print();
/// let bytes = codec.marshal(&vec![1, 2])?;
/// assert_eq!(String::from_utf8_lossy(&bytes), "[\n  1,\n  2\n]");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct JsonCodec<T> {
    pretty: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    /// Creates a codec producing compact JSON.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            _marker: PhantomData,
        }
    }

    /// Switches to indented, multi-line output.
    #[must_use]
    pub fn with_pretty_print(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Switches back to compact output.
    #[must_use]
    pub fn with_compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self {
            pretty: self.pretty,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCodec")
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl<T> Codec<T> for JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn codec_type(&self) -> CodecType {
        CodecType::Json
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(writer, value)
        } else {
            serde_json::to_writer(writer, value)
        };
        result.map_err(|e| {
            if e.is_io() {
                CodecError::io(CodecType::Json, e.into())
            } else {
                CodecError::serialization(CodecType::Json, e)
            }
        })
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                CodecError::io(CodecType::Json, e.into())
            } else {
                CodecError::deserialization(CodecType::Json, e)
            }
        })
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        result.map_err(|e| CodecError::serialization(CodecType::Json, e))
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::deserialization(CodecType::Json, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::io;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct TestMessage {
        id: u32,
        text: String,
        values: Vec<i32>,
    }

    fn message() -> TestMessage {
        TestMessage {
            id: 42,
            text: "Hello, world!".to_string(),
            values: vec![1, 2, 3, 4, 5],
        }
    }

    #[test]
    fn test_json_basic() {
        let codec = JsonCodec::new();
        let bytes = codec.marshal(&message()).unwrap();
        assert_eq!(codec.unmarshal(&bytes).unwrap(), message());
    }

    #[test]
    fn test_json_stream() {
        let codec = JsonCodec::new().with_pretty_print();
        let mut out = Vec::new();
        codec.encode(&mut out, &message()).unwrap();
        assert!(out.contains(&b'\n'));

        let decoded = codec.decode(&mut out.as_slice()).unwrap();
        assert_eq!(decoded, message());
    }

    #[test]
    fn test_json_compact_after_pretty() {
        let codec = JsonCodec::<BTreeMap<String, i32>>::new()
            .with_pretty_print()
            .with_compact();
        let value = BTreeMap::from([("a".to_string(), 1)]);
        assert_eq!(codec.marshal(&value).unwrap(), br#"{"a":1}"#);
    }

    #[test]
    fn test_json_malformed() {
        let codec = JsonCodec::<TestMessage>::new();
        let error = codec.unmarshal(b"{\"id\": 1,").unwrap_err();
        assert!(matches!(
            error,
            CodecError::Deserialization {
                codec: CodecType::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_json_non_string_key_rejected() {
        let codec = JsonCodec::<BTreeMap<Vec<u8>, i32>>::new();
        let value = BTreeMap::from([(vec![1u8], 1)]);
        let error = codec.marshal(&value).unwrap_err();
        assert!(matches!(error, CodecError::Serialization { .. }));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_writer_failure() {
        let codec = JsonCodec::new();
        let error = codec.encode(&mut FailingWriter, &message()).unwrap_err();
        assert!(matches!(error, CodecError::Io { .. }));
    }
}
