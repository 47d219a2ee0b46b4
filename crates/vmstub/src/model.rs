// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type and member descriptions consumed by the emitter and the collector.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::prelude;

// ---------------------------------------------------------------------------
// TypeRef
// ---------------------------------------------------------------------------

/// Reference to a declared type: a name plus ordered type arguments.
///
/// Two references denote the same type when both name and arguments are
/// equal. Renders as `name<arg, arg>` and parses back from that form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    name: String,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// Reference to a non-generic type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Reference to a generic instantiation.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn list(element: TypeRef) -> Self {
        Self::generic(prelude::LIST, vec![element])
    }

    pub fn set(element: TypeRef) -> Self {
        Self::generic(prelude::SET, vec![element])
    }

    pub fn array(element: TypeRef) -> Self {
        Self::generic(prelude::ARRAY, vec![element])
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::generic(prelude::MAP, vec![key, value])
    }

    pub fn option(inner: TypeRef) -> Self {
        Self::generic(prelude::OPTION, vec![inner])
    }

    /// Parse the textual `name<arg, ...>` form.
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        let mut parser = Parser { input, pos: 0 };
        let parsed = parser.type_ref().and_then(|ty| {
            parser.skip_whitespace();
            if parser.pos == input.len() {
                Ok(ty)
            } else {
                Err(format!("unexpected trailing input at offset {}", parser.pos))
            }
        });
        parsed.map_err(|reason| SchemaError::InvalidTypeRef {
            input: input.to_string(),
            reason,
        })
    }

    /// Type name without arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// True when the type is parameterized by exactly one type argument.
    pub fn is_simple_generic(&self) -> bool {
        self.args.len() == 1
    }

    /// The single type argument of a simple generic.
    pub fn simple_generic_underlying(&self) -> Option<&TypeRef> {
        match self.args.as_slice() {
            [inner] => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.to_string()
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn type_ref(&mut self) -> Result<TypeRef, String> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self
            .peek()
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '.'))
        {
            self.pos += c.len_utf8();
        }
        if start == self.pos {
            return Err(format!("expected a type name at offset {start}"));
        }
        let name = &self.input[start..self.pos];

        self.skip_whitespace();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.type_ref()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    Some(c) => return Err(format!("unexpected `{c}` at offset {}", self.pos)),
                    None => return Err("unterminated type argument list".to_string()),
                }
            }
        }

        Ok(TypeRef::generic(name, args))
    }
}

// ---------------------------------------------------------------------------
// Markers and display metadata
// ---------------------------------------------------------------------------

/// Declarative flag attached to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// Member is part of the generated view-model (the inclusion marker).
    ExportToViewModel,
    /// Member is shown in the rendered view.
    ExportToView,
    /// Member's type needs its own exported definition.
    RequiresOwnExport,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExportToViewModel => "export_to_view_model",
            Self::ExportToView => "export_to_view",
            Self::RequiresOwnExport => "requires_own_export",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a collection is laid out in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListHint {
    /// Not a list.
    #[default]
    Unused,
    /// One item per line.
    OnePerLine,
    /// All items on one line, joined by the list separator.
    UseSeparator,
}

pub const DEFAULT_LIST_SEPARATOR: &str = ",";

fn default_list_separator() -> String {
    DEFAULT_LIST_SEPARATOR.to_string()
}

/// Display metadata for a member or a type. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDisplay {
    pub display_name: String,
    /// Label of a single item when the member is a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_display_name: Option<String>,
    #[serde(default)]
    pub list_hint: ListHint,
    #[serde(default = "default_list_separator")]
    pub list_separator: String,
    /// Label of the option item (checkbox) for nullable members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_display_name: Option<String>,
}

impl ViewDisplay {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            singular_display_name: None,
            list_hint: ListHint::Unused,
            list_separator: default_list_separator(),
            option_display_name: None,
        }
    }

    #[must_use]
    pub fn with_singular(mut self, name: impl Into<String>) -> Self {
        self.singular_display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_list_hint(mut self, hint: ListHint) -> Self {
        self.list_hint = hint;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_option_display(mut self, name: impl Into<String>) -> Self {
        self.option_display_name = Some(name.into());
        self
    }
}

// ---------------------------------------------------------------------------
// MemberDef
// ---------------------------------------------------------------------------

/// One data member of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDef {
    /// Emitted key, and the target name when the member is descended into.
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub markers: BTreeSet<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<ViewDisplay>,
}

impl MemberDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            markers: BTreeSet::new(),
            display: None,
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: ViewDisplay) -> Self {
        self.display = Some(display);
        self
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

// ---------------------------------------------------------------------------
// TypeDef
// ---------------------------------------------------------------------------

/// Structural traits of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Leaf value with no structure.
    Value,
    /// Character sequence. Enumerable, but never treated as a list.
    Text,
    /// Plain type that may expose members.
    #[default]
    Record,
    Sequence,
    Set,
    Dictionary,
    Array,
    /// Nullable wrapper of its single type argument.
    Nullable,
}

impl TypeKind {
    /// Passes the "is enumerable / collection / dictionary / array" test.
    pub fn is_enumerable(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Sequence | Self::Set | Self::Dictionary | Self::Array
        )
    }
}

/// A type registered in a [`crate::Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub members: Vec<MemberDef>,
    /// Companion types whose members replace this type's own. The first one
    /// present in the schema wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<ViewDisplay>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: Vec::new(),
            metadata: Vec::new(),
            display: None,
        }
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Record)
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberDef) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberDef>) -> Self {
        self.members.extend(members);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, companion: impl Into<String>) -> Self {
        self.metadata.push(companion.into());
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: ViewDisplay) -> Self {
        self.display = Some(display);
        self
    }

    /// Reference to this (non-generic) definition.
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::named(self.name.clone())
    }
}
