// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Command-line driver for `vmstub`: one-off stub builds, reachability
//! listings and YAML job batches.

pub mod config;
pub mod generate;

pub use config::{ConfigError, Job, JobConfig};
pub use generate::{write_output, GenerationReport, Generator};
