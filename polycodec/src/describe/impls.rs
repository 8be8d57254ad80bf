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

//! [`Describe`] implementations for std and ecosystem types.

use super::{Describe, TypeDescriptor, TypeKind};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

macro_rules! describe_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::of::<$ty>(TypeKind::$kind)
                }
            }
        )*
    };
}

describe_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    char => String,
    () => Unit,
    serde_json::Value => Any,
}

impl Describe for chrono::DateTime<chrono::Utc> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Timestamp)
    }
}

impl Describe for Duration {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Opaque("Duration"))
    }
}

impl<T: ?Sized + 'static> Describe for PhantomData<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Opaque("PhantomData"))
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Optional(Box::new(T::describe())))
    }
}

// Smart pointers are transparent: they share the pointee's identity.
impl<T: Describe> Describe for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe> Describe for Arc<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe> Describe for Rc<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

macro_rules! describe_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::of::<Self>(TypeKind::Sequence(Box::new(T::describe())))
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, LinkedList, HashSet, BTreeSet);

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Array {
            element: Box::new(T::describe()),
            len: N,
        })
    }
}

impl<K: Describe, V: Describe> Describe for HashMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Map {
            key: Box::new(K::describe()),
            value: Box::new(V::describe()),
        })
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Map {
            key: Box::new(K::describe()),
            value: Box::new(V::describe()),
        })
    }
}

macro_rules! describe_tuple {
    ($($name:ident),+) => {
        impl<$($name: Describe),+> Describe for ($($name,)+) {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::of::<Self>(TypeKind::Opaque("tuple"))
            }
        }
    };
}

describe_tuple!(A);
describe_tuple!(A, B);
describe_tuple!(A, B, C);
describe_tuple!(A, B, C, D);
