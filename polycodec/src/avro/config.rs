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

//! Configuration for schema inference.

use serde::Deserialize;

/// Configuration for a [`SchemaRegistry`](super::SchemaRegistry).
///
/// # Examples
///
/// ```rust
/// use polycodec::{SchemaConfig, SchemaRegistry};
///
/// let config = SchemaConfig {
///     default_namespace: "com.example".to_string(),
///     ..Default::default()
/// };
/// let registry = SchemaRegistry::with_config(config);
/// assert_eq!(registry.config().tag_key, "avro");
/// ```
///
/// The struct also deserializes from any serde format, with missing keys
/// taking their defaults:
///
/// ```rust
/// use polycodec::SchemaConfig;
///
/// let config: SchemaConfig = serde_json::from_str(r#"{"tag_key": "wire"}"#).unwrap();
/// assert_eq!(config.tag_key, "wire");
/// assert_eq!(config.anonymous_prefix, "AnonymousRecord");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Field tag consulted for wire names.
    ///
    /// A field declared with `#[codec(avro = "name")]` is written as `name`
    /// under the default key.
    ///
    /// Default: `"avro"`
    pub tag_key: String,

    /// Namespace given to records that have no module path.
    ///
    /// Default: `"polycodec.generated"`
    pub default_namespace: String,

    /// Name prefix for anonymous records, followed by a process-unique number.
    ///
    /// Default: `"AnonymousRecord"`
    pub anonymous_prefix: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            tag_key: "avro".to_string(),
            default_namespace: "polycodec.generated".to_string(),
            anonymous_prefix: "AnonymousRecord".to_string(),
        }
    }
}
