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

//! Runtime registry of available formats.
//!
//! Every format adapter is compiled in by its cargo feature and registers
//! itself into [`CodecRegistry::with_builtin`]. Asking the factory for a
//! format that is absent from the registry yields
//! [`CodecError::NotSupported`](crate::CodecError::NotSupported) instead of
//! a compile-time failure.
//!
//! ```rust
//! use polycodec::{CodecRegistry, CodecType};
//!
//! let registry = CodecRegistry::new();
//! assert!(!registry.is_supported(CodecType::Json));
//!
//! registry.register(CodecType::Json);
//! registry.register(CodecType::Avro);
//! assert_eq!(registry.supported_codecs(), vec![CodecType::Avro, CodecType::Json]);
//! ```

use crate::codec::CodecType;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// A guarded set of the formats available to a factory.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    supported: RwLock<HashSet<CodecType>>,
}

impl CodecRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every format compiled into this build.
    #[must_use]
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        crate::formats::register_builtin(&registry);
        registry
    }

    /// Returns the process-wide registry, populated with the built-in formats.
    pub fn global() -> &'static Arc<CodecRegistry> {
        static INSTANCE: OnceLock<Arc<CodecRegistry>> = OnceLock::new();
        INSTANCE.get_or_init(|| Arc::new(CodecRegistry::with_builtin()))
    }

    /// Marks `codec` as available.
    pub fn register(&self, codec: CodecType) {
        if self.supported.write().insert(codec) {
            debug!(codec = %codec, "registered codec");
        }
    }

    /// Marks `codec` as unavailable, returning whether it was registered.
    pub fn unregister(&self, codec: CodecType) -> bool {
        self.supported.write().remove(&codec)
    }

    /// Returns `true` if `codec` is available.
    #[must_use]
    pub fn is_supported(&self, codec: CodecType) -> bool {
        self.supported.read().contains(&codec)
    }

    /// Returns the available formats sorted by tag.
    #[must_use]
    pub fn supported_codecs(&self) -> Vec<CodecType> {
        let mut codecs: Vec<_> = self.supported.read().iter().copied().collect();
        codecs.sort_unstable_by_key(CodecType::as_str);
        codecs
    }
}

/// Returns `true` if `codec` is compiled into this build.
#[must_use]
pub fn is_supported(codec: CodecType) -> bool {
    CodecRegistry::global().is_supported(codec)
}

/// Returns the formats compiled into this build, sorted by tag.
#[must_use]
pub fn supported_codecs() -> Vec<CodecType> {
    CodecRegistry::global().supported_codecs()
}
