// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! View-model stub generator.
//!
//! Emits a JavaScript object-literal skeleton mirroring a typed data model,
//! so client-side view-models are seeded from the authoritative server type
//! instead of being kept in sync by hand.
//!
//! # Architecture
//!
//! ```text
//!   #[derive(ViewModel)] / YAML / JSON
//!                 |
//!                 v
//!              Schema  ----------------+
//!                 |                    |
//!        resolve_members + classify    |
//!                 |                    |
//!                 v                    v
//!         ViewModelBuilder       TypeCollector
//!          (stub text)       (types needing export)
//! ```
//!
//! # Example
//!
//! ```rust
//! use vmstub::{Schema, ViewModel, ViewModelBuilder};
//!
//! #[derive(ViewModel)]
//! struct Address {
//!     #[view_model(export)]
//!     city: String,
//! }
//!
//! #[derive(ViewModel)]
//! struct Person {
//!     #[view_model(export)]
//!     name: String,
//!     #[view_model(export)]
//!     address: Address,
//! }
//!
//! let mut schema = Schema::new();
//! let person = schema.register::<Person>();
//! let stub = ViewModelBuilder::new(&schema)
//!     .build(&person, Some("PersonModel"), None)
//!     .unwrap();
//! assert!(stub.contains("var PersonModel = function(){"));
//! ```

// Lets `#[derive(ViewModel)]` expansions (which name `::vmstub`) work inside
// this crate's own tests.
extern crate self as vmstub;

pub mod classify;
pub mod collect;
pub mod describe;
pub mod emit;
pub mod error;
pub mod metadata;
pub mod model;
pub mod prelude;
pub mod schema;

pub use classify::{classify, Category};
pub use collect::{TypeCollector, MAX_COLLECT_DEPTH};
pub use describe::Describe;
pub use emit::{EmitOptions, LineEnding, ViewModelBuilder, MAX_EMIT_DEPTH};
pub use error::{Error, SchemaError};
pub use metadata::resolve_members;
pub use model::{ListHint, Marker, MemberDef, TypeDef, TypeKind, TypeRef, ViewDisplay};
pub use schema::{Schema, SchemaFile};

#[cfg(feature = "derive")]
pub use vmstub_derive::ViewModel;
