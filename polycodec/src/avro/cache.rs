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

//! The schema cache.
//!
//! [`SchemaRegistry`] maps a type's identity to its generated Avro schema.
//! Lookups take a shared read lock; generation is serialized behind a single
//! mutex and re-checks the map once it holds the lock, so each type's schema
//! is produced exactly once no matter how many threads race for it.
//!
//! ```text
//! get_or_create(T)
//!   ├─ Option<..> wrappers stripped, () → null
//!   ├─ read lock: hit?  ──────────────► return
//!   └─ generation lock
//!        ├─ read lock: hit? ──────────► return
//!        └─ generate, insert, count ──► return
//! ```

use super::config::SchemaConfig;
use super::generator::Generator;
use crate::describe::{Describe, TypeDescriptor, TypeKind};
use apache_avro::Schema;
use parking_lot::{Mutex, RwLock};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// A concurrent, generate-once cache of inferred Avro schemas.
///
/// Registries are independent: each owns its map, counters and
/// [`SchemaConfig`]. Most callers use the process-wide
/// [`SchemaRegistry::global`]; tests and embedders can construct their own.
///
/// # Examples
///
/// ```rust
/// use polycodec::{Describe, SchemaRegistry};
/// use std::sync::Arc;
///
/// #[derive(Describe)]
/// pub struct Reading {
///     pub sensor: String,
///     pub celsius: f64,
/// }
///
/// let registry = SchemaRegistry::new();
/// let first = registry.schema_for::<Reading>();
/// let again = registry.schema_for::<Option<Reading>>();
///
/// assert!(Arc::ptr_eq(&first, &again));
/// assert_eq!(registry.generation_count(), 1);
/// ```
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
    generation: Mutex<()>,
    anonymous: AtomicU64,
    generations: AtomicU64,
    config: SchemaConfig,
}

impl SchemaRegistry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SchemaConfig::default())
    }

    /// Creates an empty registry with `config`.
    #[must_use]
    pub fn with_config(config: SchemaConfig) -> Self {
        Self {
            schemas: RwLock::new(HashMap::new()),
            generation: Mutex::new(()),
            anonymous: AtomicU64::new(0),
            generations: AtomicU64::new(0),
            config,
        }
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static Arc<SchemaRegistry> {
        static INSTANCE: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();
        INSTANCE.get_or_init(|| Arc::new(SchemaRegistry::new()))
    }

    /// Returns the configuration this registry generates with.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Returns the schema of `descriptor`, generating it on first use.
    ///
    /// `Option` wrappers are stripped first, so `T` and `Option<T>` share
    /// one entry; nullability is applied by the caller. The unit type maps to
    /// the null schema and is never cached. Never fails: types without an
    /// Avro mapping fall back to `string`.
    pub fn get_or_create(&self, descriptor: &TypeDescriptor) -> Arc<Schema> {
        let base = descriptor.base();
        if matches!(base.kind(), TypeKind::Unit) {
            return Arc::new(Schema::Null);
        }

        let key = base.type_id();
        if let Some(schema) = self.lookup(key) {
            trace!(type_name = base.type_name(), "avro schema cache hit");
            return schema;
        }

        let _guard = self.generation.lock();
        if let Some(schema) = self.lookup(key) {
            trace!(type_name = base.type_name(), "avro schema generated by another thread");
            return schema;
        }

        let schema = Arc::new(Generator::new(&self.config, &self.anonymous).generate(base));
        self.schemas.write().insert(key, Arc::clone(&schema));
        self.generations.fetch_add(1, Ordering::Relaxed);
        debug!(
            type_name = base.type_name(),
            canonical_len = schema.canonical_form().len(),
            "generated avro schema"
        );
        schema
    }

    /// Returns the schema of `T`.
    pub fn schema_for<T: Describe>(&self) -> Arc<Schema> {
        self.get_or_create(&T::describe())
    }

    /// Drops every cached schema.
    ///
    /// The anonymous-record counter keeps counting, so records generated
    /// afterwards never reuse an earlier anonymous name.
    pub fn clear(&self) {
        let _guard = self.generation.lock();
        self.schemas.write().clear();
    }

    /// Number of cached schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Number of schemas generated over the registry's lifetime.
    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generations.load(Ordering::Relaxed)
    }

    fn lookup(&self, key: TypeId) -> Option<Arc<Schema>> {
        self.schemas.read().get(&key).cloned()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("cached", &self.len())
            .field("generations", &self.generation_count())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdMap;

    #[test]
    fn test_unit_is_null_and_not_cached() {
        let registry = SchemaRegistry::new();
        assert_eq!(*registry.schema_for::<()>(), Schema::Null);
        assert_eq!(*registry.schema_for::<Option<()>>(), Schema::Null);
        assert!(registry.is_empty());
        assert_eq!(registry.generation_count(), 0);
    }

    #[test]
    fn test_option_shares_entry() {
        let registry = SchemaRegistry::new();
        let base = registry.schema_for::<Vec<i32>>();
        let wrapped = registry.schema_for::<Option<Option<Vec<i32>>>>();
        assert!(Arc::ptr_eq(&base, &wrapped));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_regenerates_equal_schema() {
        let registry = SchemaRegistry::new();
        let before = registry.schema_for::<StdMap<String, bool>>();
        registry.clear();
        assert!(registry.is_empty());

        let after = registry.schema_for::<StdMap<String, bool>>();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.canonical_form(), after.canonical_form());
        assert_eq!(registry.generation_count(), 2);
    }

    #[test]
    fn test_registries_are_independent() {
        let a = SchemaRegistry::new();
        let b = SchemaRegistry::new();
        a.schema_for::<u8>();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
