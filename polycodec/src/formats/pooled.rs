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

//! Buffer-pooled codec wrapper.

use crate::buffer_pool::BufferPool;
use crate::codec::{Codec, CodecType};
use crate::error::CodecError;
use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// Capacity requested from the pool for each encode.
const SCRATCH_CAPACITY: usize = 1024;

/// Wraps a codec so that encoding goes through a pooled scratch buffer.
///
/// The value is always encoded in full into scratch space first; the
/// caller's buffer is only touched once encoding has succeeded. That makes
/// [`marshal_to`](Self::marshal_to) and
/// [`append_marshal`](Self::append_marshal) all-or-nothing.
///
/// The bytes are whatever the inner codec produces. Avro writes map entries
/// in hash order, so an Avro value containing a map can encode to different
/// bytes on each call; compare such payloads decoded.
///
/// # Examples
///
/// ```rust
/// use polycodec::{Codec, PooledCodec};
/// use polycodec::formats::JsonCodec;
///
/// # fn example() -> Result<(), polycodec::CodecError> {
/// let codec = PooledCodec::new(JsonCodec::<Vec<u8>>::new());
///
/// let mut out = b"stale".to_vec();
/// codec.marshal_to(&vec![1, 2], &mut out)?;
/// assert_eq!(out, b"[1,2]");
///
/// codec.append_marshal(&vec![3], &mut out)?;
/// assert_eq!(out, b"[1,2][3]");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct PooledCodec<T, C> {
    inner: C,
    pool: BufferPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> PooledCodec<T, C>
where
    C: Codec<T>,
{
    /// Wraps `inner`, drawing scratch buffers from the global pool.
    pub fn new(inner: C) -> Self {
        Self::with_pool(inner, BufferPool::global().clone())
    }

    /// Wraps `inner`, drawing scratch buffers from `pool`.
    pub fn with_pool(inner: C, pool: BufferPool) -> Self {
        Self {
            inner,
            pool,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped codec.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Returns the pool scratch buffers come from.
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Encodes `value`, replacing the contents of `out`.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped codec's error; `out` is left unchanged.
    pub fn marshal_to(&self, value: &T, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.with_scratch(value, |bytes| {
            out.clear();
            out.extend_from_slice(bytes);
        })
    }

    /// Encodes `value`, appending to `out`.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped codec's error; `out` is left unchanged.
    pub fn append_marshal(&self, value: &T, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.with_scratch(value, |bytes| out.extend_from_slice(bytes))
    }

    fn with_scratch<R>(&self, value: &T, f: impl FnOnce(&[u8]) -> R) -> Result<R, CodecError> {
        // Returned to the pool on drop, including the error path.
        let mut scratch = self.pool.acquire(SCRATCH_CAPACITY);
        self.inner.encode(&mut *scratch, value)?;
        Ok(f(&scratch))
    }
}

impl<T, C> Clone for PooledCodec<T, C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C> fmt::Debug for PooledCodec<T, C>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledCodec")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<T, C> Codec<T> for PooledCodec<T, C>
where
    C: Codec<T>,
{
    fn codec_type(&self) -> CodecType {
        self.inner.codec_type()
    }

    fn encode(&self, writer: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        let codec = self.inner.codec_type();
        self.with_scratch(value, |bytes| writer.write_all(bytes))?
            .map_err(|e| CodecError::io(codec, e))
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<T, CodecError> {
        self.inner.decode(reader)
    }

    fn marshal(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        self.with_scratch(value, <[u8]>::to_vec)
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T, CodecError> {
        self.inner.unmarshal(bytes)
    }
}
