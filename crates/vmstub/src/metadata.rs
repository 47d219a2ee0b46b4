// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member resolution with metadata overrides.
//!
//! Some model pipelines put the markers on a companion type instead of the
//! type itself (split declarations). When a type names a companion, the
//! companion's members are used wholesale; nothing is merged.

use crate::model::{MemberDef, TypeDef, TypeRef};
use crate::schema::Schema;

/// Ordered members of `ty`, preferring its metadata companion.
pub fn resolve_members<'s>(schema: &'s Schema, ty: &TypeRef) -> &'s [MemberDef] {
    let Some(def) = schema.definition(ty) else {
        return &[];
    };
    match metadata_override(schema, def) {
        Some(companion) => &companion.members,
        None => &def.members,
    }
}

/// First companion of `def` present in the schema.
pub fn metadata_override<'s>(schema: &'s Schema, def: &TypeDef) -> Option<&'s TypeDef> {
    def.metadata.iter().find_map(|name| schema.get(name))
}
