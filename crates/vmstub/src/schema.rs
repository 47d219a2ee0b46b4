// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry of type definitions.
//!
//! A [`Schema`] stands in for run-time reflection: it maps type names to
//! their [`TypeDef`]s. It is filled either by `#[derive(ViewModel)]` through
//! [`Describe`] or by loading a YAML/JSON description.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::describe::Describe;
use crate::error::SchemaError;
use crate::model::{TypeDef, TypeRef};
use crate::prelude;

/// On-disk schema description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// Type definitions keyed by name.
#[derive(Debug, Clone)]
pub struct Schema {
    types: BTreeMap<String, TypeDef>,
}

impl Schema {
    /// Schema holding only the built-in prelude.
    pub fn new() -> Self {
        let mut schema = Self::empty();
        for def in prelude::definitions() {
            schema.define(def);
        }
        schema
    }

    /// Schema with no definitions at all, not even the prelude.
    pub fn empty() -> Self {
        Schema {
            types: BTreeMap::new(),
        }
    }

    /// Prelude plus every type reachable from `T`.
    pub fn of<T: Describe + ?Sized>() -> Self {
        let mut schema = Self::new();
        schema.register::<T>();
        schema
    }

    /// Register `T` (and what it references) and return its reference.
    pub fn register<T: Describe + ?Sized>(&mut self) -> TypeRef {
        T::register(self);
        T::type_ref()
    }

    /// Insert or replace a definition.
    pub fn define(&mut self, def: TypeDef) {
        self.types.insert(def.name.clone(), def);
    }

    /// Insert a definition, rejecting a name that is already taken.
    pub fn insert(&mut self, def: TypeDef) -> Result<(), SchemaError> {
        if self.types.contains_key(&def.name) {
            return Err(SchemaError::DuplicateType(def.name));
        }
        self.define(def);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Definition behind a reference (looked up by name; arguments ignored).
    pub fn definition(&self, ty: &TypeRef) -> Option<&TypeDef> {
        self.types.get(ty.name())
    }

    /// Definitions in name order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check that every member type, type argument and metadata companion
    /// names a defined type.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for def in self.types.values() {
            for member in &def.members {
                self.check_ref(&def.name, &member.ty)?;
            }
            for companion in &def.metadata {
                if !self.contains(companion) {
                    return Err(SchemaError::UnknownType {
                        owner: def.name.clone(),
                        type_name: companion.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_ref(&self, owner: &str, ty: &TypeRef) -> Result<(), SchemaError> {
        if !self.contains(ty.name()) {
            return Err(SchemaError::UnknownType {
                owner: owner.to_string(),
                type_name: ty.name().to_string(),
            });
        }
        for arg in ty.args() {
            self.check_ref(owner, arg)?;
        }
        Ok(())
    }

    /// Merge a parsed description onto the prelude and validate it.
    pub fn from_file_contents(file: SchemaFile) -> Result<Self, SchemaError> {
        let mut schema = Self::new();
        for def in file.types {
            schema.insert(def)?;
        }
        schema.validate()?;
        tracing::debug!(types = schema.len(), "Schema loaded");
        Ok(schema)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        let file: SchemaFile = serde_yaml::from_str(content)?;
        Self::from_file_contents(file)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        let file: SchemaFile = serde_json::from_str(content)?;
        Self::from_file_contents(file)
    }

    /// Load a schema file. `.json` is read as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        tracing::debug!("Loading schema from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}
