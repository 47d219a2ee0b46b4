// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member type classification.
//!
//! Rules, in priority order:
//! 1. nullable wrapper of exactly one type argument → [`Category::NullableScalar`]
//! 2. enumerable / collection / dictionary / array → [`Category::List`]
//!    (`string` excepted, it is a scalar)
//! 3. terminal built-ins (`datetime`, `string`, `guid`) → [`Category::DateLike`]
//!    or [`Category::Scalar`]
//! 4. exposes its own members → [`Category::Composite`]
//! 5. anything else → [`Category::Scalar`]

use crate::model::{TypeKind, TypeRef};
use crate::prelude;
use crate::schema::Schema;

/// How the emitter treats a member's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Terminal value.
    Scalar,
    /// Terminal date/time value.
    DateLike,
    /// Collection; never descended.
    List,
    /// Nullable wrapper, carrying the unwrapped inner type.
    NullableScalar(TypeRef),
    /// Has its own members; descended recursively.
    Composite,
}

/// Classify a declared type. Pure; nothing is cached.
pub fn classify(schema: &Schema, ty: &TypeRef) -> Category {
    if is_nullable(schema, ty) {
        if let Some(inner) = ty.simple_generic_underlying() {
            return Category::NullableScalar(inner.clone());
        }
    }

    if is_list(schema, ty) {
        return Category::List;
    }

    if is_terminal(ty) {
        return if is_date_like(ty) {
            Category::DateLike
        } else {
            Category::Scalar
        };
    }

    let has_members = schema
        .definition(ty)
        .is_some_and(|def| !def.members.is_empty());
    if has_members {
        Category::Composite
    } else {
        Category::Scalar
    }
}

/// Collection test. Strings are enumerable, but are not lists.
pub fn is_list(schema: &Schema, ty: &TypeRef) -> bool {
    if ty.name().eq_ignore_ascii_case(prelude::STRING) {
        return false;
    }
    schema
        .definition(ty)
        .is_some_and(|def| def.kind.is_enumerable())
}

pub fn is_nullable(schema: &Schema, ty: &TypeRef) -> bool {
    schema
        .definition(ty)
        .is_some_and(|def| def.kind == TypeKind::Nullable)
}

pub fn is_date_like(ty: &TypeRef) -> bool {
    ty.name().eq_ignore_ascii_case(prelude::DATETIME)
}

fn is_terminal(ty: &TypeRef) -> bool {
    prelude::TERMINAL_TYPES
        .iter()
        .any(|name| ty.name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberDef, TypeDef};

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema.define(
            TypeDef::record("Address")
                .with_member(MemberDef::new("city", TypeRef::named("string"))),
        );
        schema.define(TypeDef::record("Empty"));
        schema
    }

    #[test]
    fn test_string_is_scalar_not_list() {
        let schema = schema();
        let string = TypeRef::named("string");
        assert!(schema.get("string").unwrap().kind.is_enumerable());
        assert!(!is_list(&schema, &string));
        assert_eq!(classify(&schema, &string), Category::Scalar);
    }

    #[test]
    fn test_collections_are_lists() {
        let schema = schema();
        let address = TypeRef::named("Address");
        for ty in [
            TypeRef::list(address.clone()),
            TypeRef::set(TypeRef::named("string")),
            TypeRef::array(TypeRef::named("u8")),
            TypeRef::map(TypeRef::named("string"), address),
        ] {
            assert_eq!(classify(&schema, &ty), Category::List, "{ty}");
        }
    }

    #[test]
    fn test_nullable_unwraps_inner() {
        let schema = schema();
        let ty = TypeRef::option(TypeRef::named("datetime"));
        assert_eq!(
            classify(&schema, &ty),
            Category::NullableScalar(TypeRef::named("datetime"))
        );
        // Nullable composites are not descended either.
        let ty = TypeRef::option(TypeRef::named("Address"));
        assert_eq!(
            classify(&schema, &ty),
            Category::NullableScalar(TypeRef::named("Address"))
        );
    }

    #[test]
    fn test_terminal_builtins() {
        let schema = schema();
        assert_eq!(
            classify(&schema, &TypeRef::named("datetime")),
            Category::DateLike
        );
        assert_eq!(classify(&schema, &TypeRef::named("DateTime")), Category::DateLike);
        assert_eq!(classify(&schema, &TypeRef::named("guid")), Category::Scalar);
    }

    #[test]
    fn test_members_decide_composite() {
        let schema = schema();
        assert_eq!(
            classify(&schema, &TypeRef::named("Address")),
            Category::Composite
        );
        assert_eq!(classify(&schema, &TypeRef::named("Empty")), Category::Scalar);
        assert_eq!(classify(&schema, &TypeRef::named("i32")), Category::Scalar);
        assert_eq!(
            classify(&schema, &TypeRef::named("Undefined")),
            Category::Scalar
        );
    }
}
