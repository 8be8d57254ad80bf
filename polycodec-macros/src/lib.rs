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

//! Derive macros for polycodec.
//!
//! This crate provides `#[derive(Describe)]`, which implements
//! `polycodec::Describe` for a struct with named fields. The generated
//! descriptor lists every field in declaration order with its visibility
//! and any per-format tags, which is what Avro schema inference walks.
//!
//! # Example
//!
//! ```ignore
//! use polycodec::Describe;
//!
//! #[derive(Describe)]
//! pub struct Account {
//!     #[codec(avro = "account_id")]
//!     pub id: u64,
//!     #[codec(avro = "-")]
//!     pub cache_key: String,
//!     balance: i64,
//! }
//! ```
//!
//! # Attributes
//!
//! - `#[codec(anonymous)]` on the struct: describe it without a name, so
//!   Avro gives it a generated `AnonymousRecord<N>` name.
//! - `#[codec(<format> = "<tag>")]` on a field: record a format-specific
//!   tag. For Avro the first comma-separated segment is the wire name and
//!   `-` leaves the field out.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generate;
mod parse;

/// Derives `polycodec::Describe` for a struct with named fields.
///
/// Enums, tuple structs and unit structs are rejected at compile time.
/// Type parameters receive a `Describe` bound.
#[proc_macro_derive(Describe, attributes(codec))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let def = match parse::parse_struct(&input) {
        Ok(def) => def,
        Err(err) => return err.to_compile_error().into(),
    };

    TokenStream::from(generate::generate_describe(&def))
}
