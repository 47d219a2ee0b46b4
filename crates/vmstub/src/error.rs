// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for stub emission, reachability collection and schema loading.

use thiserror::Error;

/// Errors raised while walking a type graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The walk went deeper than its hard ceiling. Usually a cyclic or
    /// pathological data model; the whole operation is aborted.
    #[error(
        "excessive recursion: depth {depth} exceeds the limit of {limit} at `{type_name}`, please review the data model type"
    )]
    RecursionLimitExceeded {
        /// Ceiling that was crossed.
        limit: usize,
        /// Depth at which the walk was stopped.
        depth: usize,
        /// Type being visited when the limit was hit.
        type_name: String,
    },
}

/// Errors raised while building, loading or validating a [`crate::Schema`].
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid type reference `{input}`: {reason}")]
    InvalidTypeRef { input: String, reason: String },

    #[error("type `{0}` is defined more than once")]
    DuplicateType(String),

    #[error("type `{owner}` references unknown type `{type_name}`")]
    UnknownType { owner: String, type_name: String },
}
