// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reachability collection over the type graph.
//!
//! Starting from a root type, finds every distinct type reachable through
//! members carrying a *target* marker. Members carrying a *traverse* marker
//! are walked through without being collected. Simple generics
//! (`list<T>`, `option<T>`, ...) are looked through, so the element type is
//! what gets collected.

use std::collections::HashSet;

use crate::classify::{classify, Category};
use crate::error::Error;
use crate::metadata::resolve_members;
use crate::model::{Marker, TypeRef};
use crate::schema::Schema;

/// Deepest level walked before giving up.
pub const MAX_COLLECT_DEPTH: usize = 20;

/// Walks a [`Schema`] collecting annotated types.
#[derive(Debug, Clone, Copy)]
pub struct TypeCollector<'s> {
    schema: &'s Schema,
}

/// State of one collection call.
struct Walk {
    target: Marker,
    traverse: Marker,
    visited: HashSet<TypeRef>,
    found: Vec<TypeRef>,
}

impl<'s> TypeCollector<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Every type reachable from `root` through members marked `target`,
    /// sorted by name.
    ///
    /// # Errors
    ///
    /// [`Error::RecursionLimitExceeded`] past [`MAX_COLLECT_DEPTH`] levels.
    pub fn collect(&self, root: &TypeRef, target: Marker) -> Result<Vec<TypeRef>, Error> {
        self.collect_traversing(root, target, target)
    }

    /// Like [`collect`](Self::collect), but members marked `traverse` (and
    /// not `target`) are walked without being added to the result.
    pub fn collect_traversing(
        &self,
        root: &TypeRef,
        target: Marker,
        traverse: Marker,
    ) -> Result<Vec<TypeRef>, Error> {
        tracing::debug!(root = %root, %target, %traverse, "Collecting reachable types");

        let mut walk = Walk {
            target,
            traverse,
            visited: HashSet::new(),
            found: Vec::new(),
        };
        self.visit(root, &mut walk, 0)?;

        let mut found = walk.found;
        found.sort_by(|a, b| a.name().cmp(b.name()));

        tracing::debug!(root = %root, count = found.len(), "Collection complete");
        Ok(found)
    }

    fn visit(&self, ty: &TypeRef, walk: &mut Walk, depth: usize) -> Result<(), Error> {
        if depth > MAX_COLLECT_DEPTH {
            return Err(Error::RecursionLimitExceeded {
                limit: MAX_COLLECT_DEPTH,
                depth,
                type_name: ty.to_string(),
            });
        }

        let current = effective_type(ty);

        for member in resolve_members(self.schema, current) {
            let member_ty = effective_type(&member.ty);

            // Marked before recursing so siblings and cycles never revisit it.
            if !walk.visited.insert(member_ty.clone()) {
                continue;
            }

            if member.has_marker(walk.target) && !walk.found.contains(member_ty) {
                tracing::trace!(ty = %member_ty, depth, "Collected");
                walk.found.push(member_ty.clone());
                self.visit(member_ty, walk, depth + 1)?;
            } else if member.has_marker(walk.traverse) {
                self.visit(member_ty, walk, depth + 1)?;
            }
        }

        Ok(())
    }

    /// Element types of the collection members of `root`, sorted by name.
    /// Collections without a type argument are skipped.
    pub fn collection_element_types(&self, root: &TypeRef) -> Vec<TypeRef> {
        let mut elements: Vec<TypeRef> = resolve_members(self.schema, root)
            .iter()
            .filter(|member| classify(self.schema, &member.ty) == Category::List)
            .filter_map(|member| member.ty.args().first().cloned())
            .collect();
        elements.sort_by(|a, b| a.name().cmp(b.name()));
        elements
    }
}

/// A simple generic stands for its single type argument.
fn effective_type(ty: &TypeRef) -> &TypeRef {
    ty.simple_generic_underlying().unwrap_or(ty)
}
