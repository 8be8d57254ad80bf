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

//! Scratch-buffer pooling for the pooled codecs.
//!
//! Encoding through a [`PooledCodec`](crate::PooledCodec) writes into a
//! scratch buffer taken from a [`BufferPool`] and copies the finished bytes
//! into the caller's output. The scratch buffer goes back to the pool when
//! it is dropped, so steady-state encoding does not allocate.
//!
//! # Size classes
//!
//! Buffers are bucketed by capacity into powers of four from 256 B up to
//! 64 KiB. Anything that grows past 64 KiB is released to the allocator
//! instead of being retained.
//!
//! # Example
//!
//! ```rust
//! use polycodec::BufferPool;
//!
//! let pool = BufferPool::new();
//! {
//!     let mut buffer = pool.acquire(1024);
//!     buffer.extend_from_slice(b"Hello, world!");
//! } // returned to the pool here
//!
//! let buffer = pool.acquire(1024);
//! assert!(buffer.is_empty());
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, OnceLock};

/// Largest buffer capacity that is returned to the pool (64 KiB).
pub const MAX_POOLED_SIZE: usize = 64 * 1024;

/// Maximum number of idle buffers retained per size class.
const MAX_BUFFERS_PER_CLASS: usize = 32;

const SIZE_CLASSES: &[usize] = &[
    256,   // 256 B
    1024,  // 1 KiB
    4096,  // 4 KiB
    16384, // 16 KiB
    65536, // 64 KiB
];

/// A buffer borrowed from a [`BufferPool`].
///
/// Dereferences to `Vec<u8>`. Dropping it hands the allocation back to the
/// pool it came from, unless it outgrew [`MAX_POOLED_SIZE`].
pub struct PooledBuffer {
    buffer: Vec<u8>,
    pool: Arc<PoolInner>,
}

impl PooledBuffer {
    /// Returns the capacity of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Detaches the buffer from the pool and returns its contents.
    #[must_use]
    pub fn into_inner(mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }
}

impl Deref for PooledBuffer {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        // Capacity is zero after into_inner.
        let capacity = self.buffer.capacity();
        if capacity > 0 && capacity <= MAX_POOLED_SIZE {
            self.pool.release(std::mem::take(&mut self.buffer));
        }
    }
}

struct PoolInner {
    classes: Vec<Mutex<Vec<Vec<u8>>>>,
}

impl PoolInner {
    fn new() -> Self {
        Self {
            classes: SIZE_CLASSES.iter().map(|_| Mutex::new(Vec::new())).collect(),
        }
    }

    fn take(&self, min_capacity: usize) -> Vec<u8> {
        match SIZE_CLASSES.iter().position(|&size| size >= min_capacity) {
            Some(idx) => {
                if let Some(mut buffer) = self.classes[idx].lock().pop() {
                    buffer.clear();
                    return buffer;
                }
                Vec::with_capacity(SIZE_CLASSES[idx])
            }
            None => Vec::with_capacity(min_capacity),
        }
    }

    fn release(&self, buffer: Vec<u8>) {
        // File under the largest class the buffer fully satisfies so that
        // take() never hands out less than the class promises.
        let capacity = buffer.capacity();
        if let Some(idx) = SIZE_CLASSES.iter().rposition(|&size| size <= capacity) {
            let mut class = self.classes[idx].lock();
            if class.len() < MAX_BUFFERS_PER_CLASS {
                class.push(buffer);
            }
        }
    }
}

/// A thread-safe pool of reusable byte buffers.
///
/// Cloning a `BufferPool` yields another handle to the same pool.
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

impl BufferPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(PoolInner::new()),
        }
    }

    /// Returns the process-wide pool shared by pooled codecs.
    pub fn global() -> &'static BufferPool {
        static INSTANCE: OnceLock<BufferPool> = OnceLock::new();
        INSTANCE.get_or_init(BufferPool::new)
    }

    /// Takes an empty buffer with at least `min_capacity` bytes of capacity.
    #[must_use]
    pub fn acquire(&self, min_capacity: usize) -> PooledBuffer {
        PooledBuffer {
            buffer: self.inner.take(min_capacity),
            pool: Arc::clone(&self.inner),
        }
    }

    /// Returns `(size_class, idle_buffers)` for every size class.
    #[must_use]
    pub fn stats(&self) -> Vec<(usize, usize)> {
        SIZE_CLASSES
            .iter()
            .zip(self.inner.classes.iter())
            .map(|(size, class)| (*size, class.lock().len()))
            .collect()
    }

    /// Total number of idle buffers across all size classes.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.stats().iter().map(|(_, count)| count).sum()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_capacity() {
        let pool = BufferPool::new();
        for &size in SIZE_CLASSES {
            let buffer = pool.acquire(size);
            assert!(buffer.capacity() >= size);
        }
    }

    #[test]
    fn test_buffer_is_reused_and_cleared() {
        let pool = BufferPool::new();
        {
            let mut buffer = pool.acquire(1024);
            buffer.extend_from_slice(b"test data");
        }
        assert_eq!(pool.idle(), 1);

        let buffer = pool.acquire(1024);
        assert!(buffer.is_empty());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_oversized_buffer_is_not_retained() {
        let pool = BufferPool::new();
        {
            let mut buffer = pool.acquire(16);
            buffer.resize(MAX_POOLED_SIZE + 1, 0);
        }
        assert_eq!(pool.idle(), 0);

        drop(pool.acquire(2 * MAX_POOLED_SIZE));
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_into_inner_detaches() {
        let pool = BufferPool::new();
        let mut buffer = pool.acquire(64);
        buffer.extend_from_slice(b"abc");
        assert_eq!(buffer.into_inner(), b"abc");
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_class_limit() {
        let pool = BufferPool::new();
        let held: Vec<_> = (0..MAX_BUFFERS_PER_CLASS + 4)
            .map(|_| pool.acquire(256))
            .collect();
        drop(held);
        assert_eq!(pool.stats()[0], (256, MAX_BUFFERS_PER_CLASS));
    }

    #[test]
    fn test_concurrent_use() {
        use std::thread;

        let pool = BufferPool::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let mut buffer = pool.acquire(1024);
                        buffer.extend_from_slice(b"test");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(pool.idle() > 0);
    }
}
