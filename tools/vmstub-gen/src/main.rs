// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! vmstub-gen CLI
//!
//! Generates JavaScript view-model stubs from a YAML or JSON schema.
//!
//! # Usage
//!
//! ```bash
//! # One stub on stdout
//! vmstub-gen build --schema model.yaml --type Person --name PersonModel
//!
//! # Types that need their own export
//! vmstub-gen collect --schema model.yaml --type Person
//!
//! # Root stub plus every own-export type, LF line endings
//! vmstub-gen exports --schema model.yaml --type Person --lf -o person.js
//!
//! # Batch of jobs
//! vmstub-gen run --config stubs.yaml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vmstub::{EmitOptions, LineEnding, Marker};
use vmstub_gen::{write_output, Generator, JobConfig};

#[derive(Parser)]
#[command(name = "vmstub-gen")]
#[command(about = "Generate JavaScript view-model stubs from typed data models")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the stub for one type
    Build {
        /// Schema file (YAML, or JSON by extension)
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Root type, e.g. `Person` or `list<Person>`
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        /// Variable name of the stub (defaults to the type name)
        #[arg(long)]
        name: Option<String>,

        /// Text spliced in after the last member
        #[arg(long, conflicts_with = "append_file")]
        append: Option<String>,

        /// Read the spliced text from a file
        #[arg(long, value_name = "FILE")]
        append_file: Option<PathBuf>,

        /// Use LF line endings instead of CRLF
        #[arg(long)]
        lf: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the types reachable through marked members
    Collect {
        /// Schema file (YAML, or JSON by extension)
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Root type
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        /// Marker selecting collected members
        #[arg(long, value_enum, default_value = "requires-own-export")]
        target: MarkerArg,

        /// Marker selecting members walked without being collected
        #[arg(long, value_enum)]
        traverse: Option<MarkerArg>,
    },

    /// Generate the stub for a type and every type needing its own export
    Exports {
        /// Schema file (YAML, or JSON by extension)
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Root type
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        /// Use LF line endings instead of CRLF
        #[arg(long)]
        lf: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run a YAML job file
    Run {
        /// Job file path
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MarkerArg {
    ExportToViewModel,
    ExportToView,
    RequiresOwnExport,
}

impl From<MarkerArg> for Marker {
    fn from(arg: MarkerArg) -> Self {
        match arg {
            MarkerArg::ExportToViewModel => Marker::ExportToViewModel,
            MarkerArg::ExportToView => Marker::ExportToView,
            MarkerArg::RequiresOwnExport => Marker::RequiresOwnExport,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the generated stubs.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vmstub=debug,vmstub_gen=debug")
        } else {
            EnvFilter::new("vmstub=info,vmstub_gen=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dispatch(cli.command) {
        eprintln!("[ERROR] {:#}", e);
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Build {
            schema,
            type_name,
            name,
            append,
            append_file,
            lf,
            output,
        } => {
            let append = match append_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                None => append,
            };
            let generator = Generator::from_schema_file(&schema, emit_options(lf))?;
            let text = generator.build(&type_name, name.as_deref(), append.as_deref())?;
            write_output(output.as_deref(), &text)
        }
        Commands::Collect {
            schema,
            type_name,
            target,
            traverse,
        } => {
            let generator = Generator::from_schema_file(&schema, EmitOptions::default())?;
            let target = Marker::from(target);
            let traverse = traverse.map(Marker::from).unwrap_or(target);
            for ty in generator.collect(&type_name, target, traverse)? {
                println!("{}", ty);
            }
            Ok(())
        }
        Commands::Exports {
            schema,
            type_name,
            lf,
            output,
        } => {
            let generator = Generator::from_schema_file(&schema, emit_options(lf))?;
            let (text, exported) = generator.exports(&type_name, None, None)?;
            tracing::info!("[OK] {} types exported alongside {}", exported, type_name);
            write_output(output.as_deref(), &text)
        }
        Commands::Run { config } => cmd_run(&config),
    }
}

fn cmd_run(path: &Path) -> Result<()> {
    let config = JobConfig::from_file(path)
        .with_context(|| format!("Failed to load job file {}", path.display()))?;
    let report = Generator::run(&config)?;
    report.summary();
    Ok(())
}

fn emit_options(lf: bool) -> EmitOptions {
    EmitOptions {
        line_ending: if lf { LineEnding::Lf } else { LineEnding::CrLf },
    }
}
