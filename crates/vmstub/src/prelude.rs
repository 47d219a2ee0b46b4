// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in type definitions present in every schema.

use crate::model::{MemberDef, TypeDef, TypeKind, TypeRef};

pub const STRING: &str = "string";
pub const DATETIME: &str = "datetime";
pub const GUID: &str = "guid";
pub const DECIMAL: &str = "decimal";

pub const LIST: &str = "list";
pub const SET: &str = "set";
pub const MAP: &str = "map";
pub const ARRAY: &str = "array";
pub const OPTION: &str = "option";

/// Leaf value types.
pub const PRIMITIVES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64", DECIMAL,
];

/// Types that expose members but must never be descended into.
pub const TERMINAL_TYPES: &[&str] = &[STRING, DATETIME, GUID];

/// Every built-in definition.
pub fn definitions() -> Vec<TypeDef> {
    let mut defs: Vec<TypeDef> = PRIMITIVES
        .iter()
        .map(|name| TypeDef::new(*name, TypeKind::Value))
        .collect();

    defs.push(TypeDef::new(STRING, TypeKind::Text));
    defs.push(TypeDef::new(GUID, TypeKind::Value));
    defs.push(
        TypeDef::record(DATETIME).with_members(
            ["year", "month", "day", "hour", "minute", "second"]
                .into_iter()
                .map(|part| MemberDef::new(part, TypeRef::named("i32"))),
        ),
    );

    defs.push(TypeDef::new(LIST, TypeKind::Sequence));
    defs.push(TypeDef::new(SET, TypeKind::Set));
    defs.push(TypeDef::new(MAP, TypeKind::Dictionary));
    defs.push(TypeDef::new(ARRAY, TypeKind::Array));
    defs.push(TypeDef::new(OPTION, TypeKind::Nullable));

    defs
}
