// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compile-time binding of Rust types to schema entries.
//!
//! `#[derive(ViewModel)]` implements [`Describe`] for user structs; the impls
//! below cover std containers, primitives, chrono dates and UUIDs.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::model::TypeRef;
use crate::prelude;
use crate::schema::Schema;

/// A Rust type that can describe itself to a [`Schema`].
pub trait Describe {
    /// Reference used wherever this type is declared as a member.
    fn type_ref() -> TypeRef;

    /// Add this type's definition, and the definitions it references, to
    /// `schema`. Built-ins are already in the prelude and do nothing.
    fn register(schema: &mut Schema) {
        let _ = schema;
    }
}

macro_rules! describe_builtin {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn type_ref() -> TypeRef {
                    TypeRef::named($name)
                }
            }
        )*
    };
}

describe_builtin! {
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    str => prelude::STRING,
    String => prelude::STRING,
    chrono::NaiveDate => prelude::DATETIME,
    chrono::NaiveDateTime => prelude::DATETIME,
    uuid::Uuid => prelude::GUID,
}

impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn type_ref() -> TypeRef {
        TypeRef::named(prelude::DATETIME)
    }
}

macro_rules! describe_element_container {
    ($ctor:ident => $($ty:ident),*) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn type_ref() -> TypeRef {
                    TypeRef::$ctor(T::type_ref())
                }

                fn register(schema: &mut Schema) {
                    T::register(schema);
                }
            }
        )*
    };
}

describe_element_container!(list => Vec, VecDeque);
describe_element_container!(set => BTreeSet);
describe_element_container!(option => Option);

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn type_ref() -> TypeRef {
        TypeRef::set(T::type_ref())
    }

    fn register(schema: &mut Schema) {
        T::register(schema);
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn type_ref() -> TypeRef {
        TypeRef::array(T::type_ref())
    }

    fn register(schema: &mut Schema) {
        T::register(schema);
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn type_ref() -> TypeRef {
        TypeRef::map(K::type_ref(), V::type_ref())
    }

    fn register(schema: &mut Schema) {
        K::register(schema);
        V::register(schema);
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn type_ref() -> TypeRef {
        TypeRef::map(K::type_ref(), V::type_ref())
    }

    fn register(schema: &mut Schema) {
        K::register(schema);
        V::register(schema);
    }
}

// Smart pointers are transparent.
macro_rules! describe_pointer {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ty<T> {
                fn type_ref() -> TypeRef {
                    T::type_ref()
                }

                fn register(schema: &mut Schema) {
                    T::register(schema);
                }
            }
        )*
    };
}

describe_pointer!(Box, Rc, Arc);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_refs() {
        assert_eq!(String::type_ref(), TypeRef::named("string"));
        assert_eq!(<str>::type_ref(), TypeRef::named("string"));
        assert_eq!(chrono::NaiveDateTime::type_ref(), TypeRef::named("datetime"));
        assert_eq!(
            <chrono::DateTime<chrono::Utc>>::type_ref(),
            TypeRef::named("datetime")
        );
        assert_eq!(uuid::Uuid::type_ref(), TypeRef::named("guid"));
    }

    #[test]
    fn test_container_refs() {
        assert_eq!(<Vec<String>>::type_ref().to_string(), "list<string>");
        assert_eq!(<Option<i64>>::type_ref().to_string(), "option<i64>");
        assert_eq!(
            <HashMap<String, Vec<u8>>>::type_ref().to_string(),
            "map<string, list<u8>>"
        );
        assert_eq!(<[f32; 3]>::type_ref().to_string(), "array<f32>");
        assert_eq!(<Box<Option<bool>>>::type_ref().to_string(), "option<bool>");
        assert_eq!(<Arc<str>>::type_ref(), TypeRef::named("string"));
    }

    #[test]
    fn test_builtins_leave_schema_untouched() {
        let mut schema = Schema::new();
        let before = schema.len();
        let ty = schema.register::<HashMap<String, Vec<Option<u32>>>>();
        assert_eq!(schema.len(), before);
        assert_eq!(ty.name(), "map");
        assert!(schema.validate().is_ok());
    }
}
