// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Stub generation driver
//
// Loads a schema, resolves type names given on the command line or in a
// job file, and writes the generated stubs to files or stdout.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use vmstub::{EmitOptions, Marker, Schema, TypeCollector, TypeRef, ViewModelBuilder};

use crate::config::{Job, JobConfig};

/// Generator state
pub struct Generator {
    schema: Schema,
    options: EmitOptions,
}

impl Generator {
    pub fn new(schema: Schema, options: EmitOptions) -> Self {
        Self { schema, options }
    }

    /// Load a YAML or JSON schema file.
    pub fn from_schema_file(path: &Path, options: EmitOptions) -> Result<Self> {
        tracing::info!("Loading schema from: {:?}", path);
        let schema = Schema::from_file(path)
            .with_context(|| format!("Failed to load schema {}", path.display()))?;
        tracing::debug!(types = schema.len(), "Schema loaded");
        Ok(Self::new(schema, options))
    }

    /// Parse `input` as a type reference whose types are all defined.
    pub fn resolve(&self, input: &str) -> Result<TypeRef> {
        let ty = TypeRef::parse(input)?;
        let mut pending = vec![&ty];
        while let Some(current) = pending.pop() {
            if !self.schema.contains(current.name()) {
                bail!("Unknown type `{}`", current.name());
            }
            pending.extend(current.args());
        }
        Ok(ty)
    }

    /// Stub for one type.
    pub fn build(
        &self,
        type_name: &str,
        name: Option<&str>,
        append: Option<&str>,
    ) -> Result<String> {
        let root = self.resolve(type_name)?;
        let text = ViewModelBuilder::new(&self.schema)
            .with_options(self.options.clone())
            .build(&root, name, append)
            .with_context(|| format!("Failed to build stub for {}", root))?;
        Ok(text)
    }

    /// Types reachable from `type_name` through `target` members, walking
    /// through `traverse` members.
    pub fn collect(
        &self,
        type_name: &str,
        target: Marker,
        traverse: Marker,
    ) -> Result<Vec<TypeRef>> {
        let root = self.resolve(type_name)?;
        let found = TypeCollector::new(&self.schema)
            .collect_traversing(&root, target, traverse)
            .with_context(|| format!("Failed to collect types from {}", root))?;
        Ok(found)
    }

    /// Stub for `type_name` followed by one stub per type it requires to
    /// be exported on its own.
    pub fn exports(
        &self,
        type_name: &str,
        name: Option<&str>,
        append: Option<&str>,
    ) -> Result<(String, usize)> {
        let mut text = self.build(type_name, name, append)?;
        let exported = self.collect(
            type_name,
            Marker::RequiresOwnExport,
            Marker::ExportToViewModel,
        )?;
        for ty in &exported {
            text.push_str(&self.build(&ty.to_string(), None, None)?);
        }
        Ok((text, exported.len()))
    }

    /// Run a whole job file.
    pub fn run(config: &JobConfig) -> Result<GenerationReport> {
        let options = EmitOptions {
            line_ending: config.line_ending,
        };
        let generator = Self::from_schema_file(&config.schema, options)?;

        tracing::info!("Starting generation of {} jobs", config.jobs.len());
        let mut report = GenerationReport::new();
        for job in &config.jobs {
            generator
                .run_job(job, &mut report)
                .with_context(|| format!("Job `{}` failed", job.type_name))?;
        }

        tracing::info!("[OK] Generation complete");
        Ok(report)
    }

    fn run_job(&self, job: &Job, report: &mut GenerationReport) -> Result<()> {
        let name = job.name.as_deref();
        let append = job.append.as_deref();
        let text = if job.exports {
            let (text, exported) = self.exports(&job.type_name, name, append)?;
            report.types_exported += exported;
            text
        } else {
            self.build(&job.type_name, name, append)?
        };

        write_output(job.output.as_deref(), &text)?;
        match &job.output {
            Some(path) => report.files_written.push(path.display().to_string()),
            None => report.stubs_printed += 1,
        }
        Ok(())
    }
}

/// Write `text` to `path`, creating parent directories, or to stdout.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("[OK] Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Generation report
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub files_written: Vec<String>,
    pub stubs_printed: usize,
    pub types_exported: usize,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the report on stderr so stubs on stdout stay clean.
    pub fn summary(&self) {
        eprintln!("\n{}", "=".repeat(60));
        eprintln!("  View-Model Stub Generation Report");
        eprintln!("{}", "=".repeat(60));
        eprintln!();
        eprintln!("  [OK] Files written:   {}", self.files_written.len());
        eprintln!("  [OK] Stubs printed:   {}", self.stubs_printed);
        eprintln!("  [OK] Types exported:  {}", self.types_exported);
        if !self.files_written.is_empty() {
            eprintln!();
            eprintln!("  Generated:");
            for file in &self.files_written {
                eprintln!("    - {}", file);
            }
        }
        eprintln!();
        eprintln!("{}", "=".repeat(60));
    }
}
