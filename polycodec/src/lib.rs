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

#![doc = include_str!("../../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Lets `#[derive(Describe)]` expand to `::polycodec::...` paths inside this crate.
extern crate self as polycodec;

pub mod buffer_pool;
pub mod codec;
pub mod describe;
pub mod error;
pub mod factory;
pub mod formats;
pub mod registry;

#[cfg(feature = "avro")]
pub mod avro;

#[cfg(feature = "derive")]
pub use polycodec_macros::Describe;

pub use buffer_pool::{BufferPool, PooledBuffer};
pub use codec::{Codec, CodecType, ParseCodecTypeError};
pub use describe::{Describe, FieldDescriptor, StructDescriptor, TypeDescriptor, TypeKind};
pub use error::CodecError;
pub use factory::{CodecFactory, new, new_pooled};
pub use formats::PooledCodec;
pub use registry::{CodecRegistry, is_supported, supported_codecs};

#[cfg(feature = "avro")]
pub use avro::{AvroCodec, SchemaConfig, SchemaRegistry};

#[cfg(feature = "protobuf")]
pub use factory::new_protobuf;
