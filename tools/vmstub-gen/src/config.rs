// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Batch job configuration.
//!
//! A job file names one schema and a list of stubs to generate from it:
//!
//! ```yaml
//! schema: model.yaml
//! line_ending: crlf
//! jobs:
//!   - type: Person
//!     name: PersonModel
//!     append: "save: null"
//!     output: out/person.js
//!     exports: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vmstub::LineEnding;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A batch of generation jobs sharing one schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Schema file (YAML or JSON).
    pub schema: PathBuf,

    /// Line ending of every generated stub.
    #[serde(default)]
    pub line_ending: LineEnding,

    /// Stubs to generate.
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// One stub to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Root type name.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Variable name in the stub. Defaults to the type name.
    #[serde(default)]
    pub name: Option<String>,

    /// Text spliced in after the last member.
    #[serde(default)]
    pub append: Option<String>,

    /// Output file. Stdout when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Also emit a stub for every type needing its own export.
    #[serde(default)]
    pub exports: bool,
}

impl Job {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
            append: None,
            output: None,
            exports: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

impl JobConfig {
    /// Load and validate a job file. Relative paths are resolved against
    /// the directory holding the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Parse and validate a job file body. Paths are kept as written.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("No schema file configured".into()));
        }

        if self.jobs.is_empty() {
            return Err(ConfigError::Invalid("No jobs configured".into()));
        }

        for (i, job) in self.jobs.iter().enumerate() {
            if job.type_name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("Job {} has empty type name", i)));
            }
            if job.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "Job {} ({}) has empty target name",
                    i, job.type_name
                )));
            }
        }

        Ok(())
    }

    fn rebase(&mut self, base: &Path) {
        self.schema = rebased(base, &self.schema);
        for job in &mut self.jobs {
            if let Some(output) = &job.output {
                job.output = Some(rebased(base, output));
            }
        }
    }
}

fn rebased(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
