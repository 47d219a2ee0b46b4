// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JavaScript view-model stub emission.
//!
//! Walks a type's marked members and renders a `var <Name> = function(){ return { ... } }`
//! literal, wrapped in begin/end banners. Scalars become `""`, dates
//! `new Date()`, collections `[]`, and composites nest one level deeper.
//!
//! The exact layout (CRLF, banner widths, the stray spaces after `{`) is kept
//! byte-for-byte so regenerated files diff cleanly against existing ones.

use serde::{Deserialize, Serialize};

use crate::classify::{classify, is_date_like, Category};
use crate::error::Error;
use crate::metadata::resolve_members;
use crate::model::{Marker, MemberDef, TypeRef};
use crate::schema::Schema;

/// Deepest nesting level rendered before giving up.
pub const MAX_EMIT_DEPTH: usize = 10;

const INDENT_WIDTH: usize = 4;

const RULE: &str = "//---------------------------------------------------------------";
const BEGIN_BANNER: &str = "//      Begin Auto Generated code -------------------------------";
const END_BANNER: &str = "//      End Auto Generated code -------------------------------";
const TITLE_PREFIX: &str = "//      For Model Type - ";
/// Column at which the "For Model Type" line is cut.
const TITLE_WIDTH: usize = 67;

const SCALAR_VALUE: &str = "\"\"";
const LIST_VALUE: &str = "[]";
const DATE_VALUE: &str = "new Date()";

/// Line terminator used in generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Emitter options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    #[serde(default)]
    pub line_ending: LineEnding,
}

/// Builds view-model stubs from a [`Schema`].
///
/// Stateless apart from its borrowed inputs; every [`build`](Self::build)
/// call starts from fresh state.
#[derive(Debug, Clone)]
pub struct ViewModelBuilder<'s> {
    schema: &'s Schema,
    options: EmitOptions,
}

/// One level of the descent.
struct Frame<'a> {
    target: &'a str,
    depth: usize,
    label: &'a str,
    ty: &'a TypeRef,
    is_last: bool,
}

impl<'s> ViewModelBuilder<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            options: EmitOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Render the stub for `root`.
    ///
    /// `target_name` names the generated variable and defaults to the root
    /// type's name. `trailing` is spliced verbatim into the root object,
    /// after the generated members.
    ///
    /// # Errors
    ///
    /// [`Error::RecursionLimitExceeded`] when composites nest deeper than
    /// [`MAX_EMIT_DEPTH`].
    pub fn build(
        &self,
        root: &TypeRef,
        target_name: Option<&str>,
        trailing: Option<&str>,
    ) -> Result<String, Error> {
        let root_label = root.to_string();
        let target = target_name.unwrap_or(root.name());
        tracing::debug!(root = %root, name = target, "Building view-model stub");

        let mut out = String::new();
        self.emit(
            &mut out,
            &Frame {
                target,
                depth: 1,
                label: &root_label,
                ty: root,
                is_last: true,
            },
            trailing,
        )?;

        tracing::debug!(root = %root, bytes = out.len(), "View-model stub built");
        Ok(out)
    }

    fn emit(&self, out: &mut String, frame: &Frame<'_>, trailing: Option<&str>) -> Result<(), Error> {
        if frame.depth > MAX_EMIT_DEPTH {
            return Err(Error::RecursionLimitExceeded {
                limit: MAX_EMIT_DEPTH,
                depth: frame.depth,
                type_name: frame.ty.to_string(),
            });
        }
        tracing::trace!(name = frame.target, depth = frame.depth, "Descending");

        let eol = self.options.line_ending.as_str();
        let padding = indent(frame.depth + 1);

        if frame.depth == 1 {
            self.open_root(out, frame);
        } else {
            out.push_str(&format!("{}{}: {{ {eol}", indent(frame.depth), frame.target));
        }

        let members: Vec<&MemberDef> = resolve_members(self.schema, frame.ty)
            .iter()
            .filter(|m| m.has_marker(Marker::ExportToViewModel))
            .collect();
        let count = members.len();

        for (index, member) in members.iter().enumerate() {
            let is_last = index + 1 == count;
            let placeholder = match classify(self.schema, &member.ty) {
                Category::Composite => {
                    let label = member.ty.to_string();
                    self.emit(
                        out,
                        &Frame {
                            target: &member.name,
                            depth: frame.depth + 1,
                            label: &label,
                            ty: &member.ty,
                            is_last,
                        },
                        None,
                    )?;
                    continue;
                }
                Category::List => LIST_VALUE,
                Category::DateLike => DATE_VALUE,
                Category::NullableScalar(inner) if is_date_like(&inner) => DATE_VALUE,
                Category::NullableScalar(_) | Category::Scalar => SCALAR_VALUE,
            };
            let comma = if is_last { "" } else { "," };
            out.push_str(&format!("{padding}{}: {placeholder}{comma}{eol}", member.name));
        }

        if frame.depth == 1 {
            if let Some(text) = trailing.filter(|t| !t.is_empty()) {
                if count > 0 {
                    out.push_str(&format!("{padding},{eol}"));
                }
                out.push_str(&format!("{padding}//--{eol}{padding}{text}{eol}"));
            }
            self.close_root(out);
        } else {
            let comma = if frame.is_last { "" } else { "," };
            out.push_str(&format!("{}}}{comma}", indent(frame.depth)));
        }
        out.push_str(eol);

        Ok(())
    }

    fn open_root(&self, out: &mut String, frame: &Frame<'_>) {
        let eol = self.options.line_ending.as_str();

        let title: String = format!("{TITLE_PREFIX}{}   {}", frame.label, &RULE[2..])
            .chars()
            .take(TITLE_WIDTH)
            .collect();

        out.push_str(eol);
        for line in [RULE, BEGIN_BANNER, title.as_str(), RULE] {
            out.push_str(line);
            out.push_str(eol);
        }
        out.push_str(&format!("var {} = function(){{ {eol} ", frame.target));
        out.push_str(&format!("    return {{{eol}"));
    }

    fn close_root(&self, out: &mut String) {
        let eol = self.options.line_ending.as_str();
        for line in ["    }", "}", RULE, END_BANNER, RULE] {
            out.push_str(line);
            out.push_str(eol);
        }
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(depth * INDENT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeDef;

    fn exported(name: &str, ty: TypeRef) -> MemberDef {
        MemberDef::new(name, ty).with_marker(Marker::ExportToViewModel)
    }

    fn lf() -> EmitOptions {
        EmitOptions {
            line_ending: LineEnding::Lf,
        }
    }

    #[test]
    fn test_title_is_padded_to_width() {
        let mut schema = Schema::new();
        schema.define(TypeDef::record("Person"));
        let text = ViewModelBuilder::new(&schema)
            .with_options(lf())
            .build(&TypeRef::named("Person"), None, None)
            .unwrap();
        let title = text
            .lines()
            .find(|l| l.starts_with(TITLE_PREFIX))
            .unwrap();
        assert_eq!(title.len(), TITLE_WIDTH);
        assert!(title.starts_with("//      For Model Type - Person   ---"));
        assert!(title.ends_with('-'));
    }

    #[test]
    fn test_long_title_is_truncated() {
        let name = "A".repeat(80);
        let mut schema = Schema::new();
        schema.define(TypeDef::record(name.clone()));
        let text = ViewModelBuilder::new(&schema)
            .with_options(lf())
            .build(&TypeRef::named(name), None, None)
            .unwrap();
        let title = text
            .lines()
            .find(|l| l.starts_with(TITLE_PREFIX))
            .unwrap();
        assert_eq!(title.len(), TITLE_WIDTH);
        assert!(title.ends_with('A'));
    }

    #[test]
    fn test_unmarked_members_are_invisible() {
        let mut schema = Schema::new();
        schema.define(
            TypeDef::record("Account")
                .with_member(MemberDef::new("secret", TypeRef::named("string")))
                .with_member(exported("login", TypeRef::named("string"))),
        );
        let text = ViewModelBuilder::new(&schema)
            .with_options(lf())
            .build(&TypeRef::named("Account"), None, None)
            .unwrap();
        assert!(!text.contains("secret"));
        assert!(text.contains("        login: \"\"\n"));
    }

    #[test]
    fn test_nested_frame_commas() {
        let mut schema = Schema::new();
        schema.define(
            TypeDef::record("Outer")
                .with_member(exported("first", TypeRef::named("Inner")))
                .with_member(exported("second", TypeRef::named("Inner"))),
        );
        schema.define(
            TypeDef::record("Inner").with_member(exported("value", TypeRef::named("i32"))),
        );
        let text = ViewModelBuilder::new(&schema)
            .with_options(lf())
            .build(&TypeRef::named("Outer"), None, None)
            .unwrap();
        let body = "        first: { \n            value: \"\"\n        },\n        second: { \n            value: \"\"\n        }\n    }\n";
        assert!(text.contains(body), "{text}");
    }

    #[test]
    fn test_nullable_placeholders() {
        let mut schema = Schema::new();
        schema.define(
            TypeDef::record("Event")
                .with_member(exported("when", TypeRef::option(TypeRef::named("datetime"))))
                .with_member(exported("count", TypeRef::option(TypeRef::named("i32")))),
        );
        let text = ViewModelBuilder::new(&schema)
            .with_options(lf())
            .build(&TypeRef::named("Event"), None, None)
            .unwrap();
        assert!(text.contains("        when: new Date(),\n"));
        assert!(text.contains("        count: \"\"\n"));
    }

    #[test]
    fn test_crlf_is_default() {
        let mut schema = Schema::new();
        schema.define(TypeDef::record("Empty"));
        let text = ViewModelBuilder::new(&schema)
            .build(&TypeRef::named("Empty"), None, None)
            .unwrap();
        assert!(text.starts_with("\r\n//----"));
        assert!(text.ends_with("//---------------------------------------------------------------\r\n\r\n"));
        assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
    }
}
