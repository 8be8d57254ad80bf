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

//! Avro support with schema inference.
//!
//! Avro needs a schema for every value it writes. This module derives one
//! from a type's [`Describe`](crate::Describe) implementation, caches it per
//! type in a [`SchemaRegistry`], and binds it to an [`AvroCodec`].
//!
//! # Overview
//!
//! - **[`SchemaRegistry`]**: generate-once, thread-safe schema cache
//! - **[`generator`]**: descriptor to schema mapping and field rules
//! - **[`shape`]**: value conversion between serde and the inferred schema
//! - **[`AvroCodec`]**: the [`Codec`](crate::Codec) implementation
//! - **[`SchemaConfig`]**: tag key, default namespace, anonymous prefix
//!
//! # Field rules
//!
//! Record fields follow declaration order. A field is left out of the
//! schema when it is not `pub`, when its `avro` tag starts with `-`, when
//! its wire name is not a valid Avro name, or when an earlier field already
//! took the same wire name. Fields left out must carry `#[serde(default)]`
//! (or be `Option`s) for decoding to succeed.
//!
//! ```rust
//! use polycodec::{AvroCodec, Codec, Describe};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Describe, Debug, PartialEq)]
//! pub struct Event {
//!     pub id: u64,
//!     #[codec(avro = "-")]
//!     #[serde(default)]
//!     pub debug_note: String,
//!     pub parent: Option<Box<Event>>,
//! }
//!
//! # fn example() -> Result<(), polycodec::CodecError> {
//! let codec = AvroCodec::<Event>::new();
//! let event = Event {
//!     id: 2,
//!     debug_note: String::new(),
//!     parent: Some(Box::new(Event { id: 1, debug_note: String::new(), parent: None })),
//! };
//! assert_eq!(codec.unmarshal(&codec.marshal(&event)?)?, event);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod cache;
mod codec;
mod config;
pub mod generator;
pub mod shape;

pub use self::cache::SchemaRegistry;
pub use self::codec::AvroCodec;
pub use self::config::SchemaConfig;
pub use self::shape::ShapeError;
