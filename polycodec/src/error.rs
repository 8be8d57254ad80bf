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

//! Error types for codec construction and use.
//!
//! Every failure surfaced by this crate is a [`CodecError`]. Each variant
//! records the [`CodecType`] it came from so callers juggling several formats
//! can tell them apart, and the underlying library error is kept verbatim as
//! the [`source`](std::error::Error::source) of the variant.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`CodecError::NotSupported`] | the format is not registered in this build |
//! | [`CodecError::InvalidConstruction`] | the format exists but must be built another way |
//! | [`CodecError::SchemaParse`] | an explicit schema is malformed |
//! | [`CodecError::Serialization`] | the format library rejects a value |
//! | [`CodecError::Deserialization`] | input bytes are malformed or truncated |
//! | [`CodecError::Io`] | the writer or reader fails |
//!
//! Nothing in this crate retries; errors go straight back to the caller.

use crate::codec::CodecType;
use std::io;
use thiserror::Error;

/// Boxed error from an underlying format library.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by codecs, the codec registry and the factory.
///
/// # Examples
///
/// ```rust
/// use polycodec::{CodecError, CodecType};
///
/// let error = CodecError::NotSupported { codec: CodecType::Avro };
/// assert!(error.is_not_supported());
/// assert_eq!(error.codec_type(), CodecType::Avro);
/// assert!(error.to_string().contains("avro"));
/// ```
#[derive(Debug, Error)]
pub enum CodecError {
    /// The requested format is not available in this build.
    ///
    /// Recoverable by choosing another format or rebuilding with the
    /// matching cargo feature.
    #[error("codec \"{codec}\" is not supported in this build; rebuild with the `{codec}` feature enabled")]
    NotSupported {
        /// The unavailable format
        codec: CodecType,
    },

    /// The format is available but cannot be constructed through this path.
    #[error("cannot construct {codec} codec: {reason}")]
    InvalidConstruction {
        /// The requested format
        codec: CodecType,
        /// Why construction was refused
        reason: String,
    },

    /// An explicitly supplied schema could not be parsed.
    #[error("failed to parse {codec} schema: {source}")]
    SchemaParse {
        /// The format owning the schema
        codec: CodecType,
        /// The parser error
        #[source]
        source: BoxError,
    },

    /// The format library rejected a value while encoding.
    #[error("{codec} serialization failed: {source}")]
    Serialization {
        /// The encoding format
        codec: CodecType,
        /// The library error
        #[source]
        source: BoxError,
    },

    /// The input could not be decoded.
    #[error("{codec} deserialization failed: {source}")]
    Deserialization {
        /// The decoding format
        codec: CodecType,
        /// The library error
        #[source]
        source: BoxError,
    },

    /// Reading from or writing to the stream failed.
    #[error("{codec} I/O error: {source}")]
    Io {
        /// The format in use
        codec: CodecType,
        /// The I/O error
        #[source]
        source: io::Error,
    },
}

impl CodecError {
    /// Wraps a library error raised while encoding.
    pub fn serialization(codec: CodecType, source: impl Into<BoxError>) -> Self {
        Self::Serialization {
            codec,
            source: source.into(),
        }
    }

    /// Wraps a library error raised while decoding.
    pub fn deserialization(codec: CodecType, source: impl Into<BoxError>) -> Self {
        Self::Deserialization {
            codec,
            source: source.into(),
        }
    }

    /// Wraps a schema parser error.
    pub fn schema_parse(codec: CodecType, source: impl Into<BoxError>) -> Self {
        Self::SchemaParse {
            codec,
            source: source.into(),
        }
    }

    /// Wraps a stream error.
    pub fn io(codec: CodecType, source: io::Error) -> Self {
        Self::Io { codec, source }
    }

    /// Returns the format this error belongs to.
    #[must_use]
    pub const fn codec_type(&self) -> CodecType {
        match self {
            Self::NotSupported { codec }
            | Self::InvalidConstruction { codec, .. }
            | Self::SchemaParse { codec, .. }
            | Self::Serialization { codec, .. }
            | Self::Deserialization { codec, .. }
            | Self::Io { codec, .. } => *codec,
        }
    }

    /// Returns `true` if the format is missing from this build.
    #[must_use]
    pub const fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}
