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

//! Type descriptors.
//!
//! A [`TypeDescriptor`] describes the shape of a Rust type: its kind, the
//! element types of containers, and for structs the ordered list of fields
//! with their names, visibility and per-format tags. Schema-driven formats
//! (Avro) walk these descriptors to build a schema for a type.
//!
//! Types expose their descriptor through the [`Describe`] trait. It is
//! implemented here for the std containers and scalars, for
//! [`chrono::DateTime<Utc>`](chrono::DateTime) (the timestamp type) and for
//! [`serde_json::Value`] (the "any" type). User structs derive it:
//!
//! ```rust
//! use polycodec::{Describe, TypeKind};
//!
//! #[derive(Describe)]
//! pub struct Account {
//!     #[codec(avro = "account_id")]
//!     pub id: u64,
//!     pub owner: Option<String>,
//!     balance_cents: i64,
//! }
//!
//! let descriptor = Account::describe();
//! let TypeKind::Struct(record) = descriptor.kind() else { unreachable!() };
//! assert_eq!(record.name(), Some("Account"));
//! assert_eq!(record.fields().len(), 3);
//! assert_eq!(record.fields()[0].tag("avro"), Some("account_id"));
//! assert!(!record.fields()[2].is_exported());
//! ```

mod impls;

use std::any::TypeId;
use std::fmt;

/// Provides the [`TypeDescriptor`] of a type.
///
/// Implement by hand for types with a custom shape, or derive it for structs
/// with named fields.
pub trait Describe: 'static {
    /// Returns the descriptor of `Self`.
    fn describe() -> TypeDescriptor;
}

/// The shape of a type.
#[derive(Clone, Debug)]
pub enum TypeKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// Text: `String` and `char`.
    String,
    /// A variable-length sequence.
    Sequence(Box<TypeDescriptor>),
    /// A fixed-length array.
    Array {
        /// Element type
        element: Box<TypeDescriptor>,
        /// Number of elements
        len: usize,
    },
    /// An associative map.
    Map {
        /// Key type
        key: Box<TypeDescriptor>,
        /// Value type
        value: Box<TypeDescriptor>,
    },
    /// A struct with named fields.
    Struct(StructDescriptor),
    /// A nullable wrapper (`Option<T>`).
    Optional(Box<TypeDescriptor>),
    /// A dynamically typed value.
    Any,
    /// A point in time.
    Timestamp,
    /// The unit type; describes "no value".
    Unit,
    /// A shape with no direct schema mapping, named for diagnostics.
    Opaque(&'static str),
}

impl TypeKind {
    /// Returns `true` for the 8-bit unsigned integer kind.
    #[must_use]
    pub const fn is_byte(&self) -> bool {
        matches!(self, TypeKind::U8)
    }

    /// Returns `true` for the text kind.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, TypeKind::String)
    }
}

/// Describes a type: its identity, its name and its shape.
#[derive(Clone)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Creates the descriptor of `T` with the given shape.
    #[must_use]
    pub fn of<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind,
        }
    }

    /// Identity of the described type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full Rust name of the described type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Shape of the described type.
    #[must_use]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns `true` if this is a nullable wrapper.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self.kind, TypeKind::Optional(_))
    }

    /// Strips every nullable wrapper, returning the underlying descriptor.
    #[must_use]
    pub fn base(&self) -> &TypeDescriptor {
        let mut current = self;
        while let TypeKind::Optional(inner) = &current.kind {
            current = inner;
        }
        current
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Describes a struct: its name, declaring module and fields.
///
/// A struct without a name is anonymous; schema generators synthesize a
/// name for it.
#[derive(Clone, Debug)]
pub struct StructDescriptor {
    name: Option<&'static str>,
    module_path: Option<&'static str>,
    fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Creates a named struct declared in `module_path`.
    #[must_use]
    pub fn named(name: &'static str, module_path: &'static str) -> Self {
        Self {
            name: Some(name),
            module_path: Some(module_path),
            fields: Vec::new(),
        }
    }

    /// Creates an anonymous struct.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            name: None,
            module_path: None,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declared name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Declaring module path, if any.
    #[must_use]
    pub fn module_path(&self) -> Option<&'static str> {
        self.module_path
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// Describes one struct field.
///
/// The field type is resolved lazily through a function pointer so that a
/// struct can refer to itself.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    exported: bool,
    tags: Vec<(&'static str, &'static str)>,
    ty: fn() -> TypeDescriptor,
}

impl FieldDescriptor {
    /// Creates a non-exported, untagged field.
    #[must_use]
    pub fn new(name: &'static str, ty: fn() -> TypeDescriptor) -> Self {
        Self {
            name,
            exported: false,
            tags: Vec::new(),
            ty,
        }
    }

    /// Sets whether the field is publicly visible.
    #[must_use]
    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// Adds a format-specific tag, e.g. `("avro", "user_id,omitempty")`.
    #[must_use]
    pub fn with_tag(mut self, key: &'static str, value: &'static str) -> Self {
        self.tags.push((key, value));
        self
    }

    /// Declared field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the field is publicly visible.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Returns the tag value for `key`, if declared.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Resolves the field's type descriptor.
    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }

    /// Resolves the wire name of this field for the format tagged `key`.
    ///
    /// The first comma-separated segment of the tag wins; a segment of `-`
    /// excludes the field (`None`); an absent or empty tag falls back to the
    /// declared name.
    #[must_use]
    pub fn wire_name(&self, key: &str) -> Option<&'static str> {
        let Some(tag) = self.tag(key) else {
            return Some(self.name);
        };
        match tag.split(',').next().unwrap_or_default() {
            "-" => None,
            "" => Some(self.name),
            name => Some(name),
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("exported", &self.exported)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_optional_base_is_inner() {
        let descriptor = <Option<Option<String>>>::describe();
        assert!(descriptor.is_optional());
        assert_eq!(descriptor.base().type_id(), TypeId::of::<String>());
        assert!(descriptor.base().kind().is_string());
    }

    #[test]
    fn test_box_is_transparent() {
        assert_eq!(<Box<u32>>::describe().type_id(), TypeId::of::<u32>());
        assert_eq!(
            <std::sync::Arc<String>>::describe().type_id(),
            TypeId::of::<String>()
        );
    }

    #[test]
    fn test_containers() {
        match <Vec<u8>>::describe().kind() {
            TypeKind::Sequence(element) => assert!(element.kind().is_byte()),
            other => panic!("unexpected kind {other:?}"),
        }
        match <[i16; 4]>::describe().kind() {
            TypeKind::Array { element, len } => {
                assert!(matches!(element.kind(), TypeKind::I16));
                assert_eq!(*len, 4);
            }
            other => panic!("unexpected kind {other:?}"),
        }
        match <HashMap<u32, bool>>::describe().kind() {
            TypeKind::Map { key, value } => {
                assert!(matches!(key.kind(), TypeKind::U32));
                assert!(matches!(value.kind(), TypeKind::Bool));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_wire_name_rules() {
        let plain = FieldDescriptor::new("Plain", <i32>::describe);
        assert_eq!(plain.wire_name("avro"), Some("Plain"));

        let tagged = FieldDescriptor::new("Tagged", <i32>::describe).with_tag("avro", "renamed,omitempty");
        assert_eq!(tagged.wire_name("avro"), Some("renamed"));
        assert_eq!(tagged.wire_name("json"), Some("Tagged"));

        let empty = FieldDescriptor::new("Empty", <i32>::describe).with_tag("avro", ",omitempty");
        assert_eq!(empty.wire_name("avro"), Some("Empty"));

        let skipped = FieldDescriptor::new("Skipped", <i32>::describe).with_tag("avro", "-");
        assert_eq!(skipped.wire_name("avro"), None);
    }

    #[test]
    fn test_struct_builder() {
        let record = StructDescriptor::named("Pair", "demo::pairs")
            .with_field(FieldDescriptor::new("left", <String>::describe).exported(true))
            .with_field(FieldDescriptor::new("right", <Option<u64>>::describe));
        assert_eq!(record.name(), Some("Pair"));
        assert_eq!(record.module_path(), Some("demo::pairs"));
        assert!(record.fields()[0].is_exported());
        assert!(record.fields()[1].descriptor().is_optional());

        let anonymous = StructDescriptor::anonymous();
        assert!(anonymous.name().is_none());
        assert!(anonymous.module_path().is_none());
    }
}
