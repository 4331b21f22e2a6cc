// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! matwrite CLI
//!
//! With no arguments, benchmarks the three serialization strategies under
//! the reference configuration and prints the minimum time of each, in
//! seconds, one per line, in the order A, B, C.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// matwrite - matrix-to-text serialization benchmark
#[derive(Parser)]
#[command(name = "matwrite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (reference configuration if omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Time every strategy and print the minimum per strategy (default)
    Run(RunArgs),

    /// Check that every strategy renders identical output
    Verify(MatrixArgs),

    /// Serialize one generated matrix with a single strategy
    Write {
        /// Strategy: concat, bulk_writer or flat_expansion (or A, B, C)
        #[arg(short, long, default_value = "concat")]
        strategy: String,

        #[command(flatten)]
        matrix: MatrixArgs,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: PathBuf,
    },
}

/// Overrides applied on top of the loaded configuration.
#[derive(Args, Default)]
pub struct MatrixArgs {
    /// Number of matrix rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Seed for matrix generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Executions per repetition group
    #[arg(short, long)]
    pub iterations: Option<u64>,

    /// Number of repetition groups
    #[arg(short, long)]
    pub repeat: Option<u64>,

    /// Untimed executions per strategy before measurement
    #[arg(long, default_value_t = 0)]
    pub warmup: u64,

    /// Skip the output equivalence check
    #[arg(long)]
    pub no_verify: bool,

    /// Keep every execution time in the JSON report
    #[arg(long)]
    pub keep_samples: bool,

    /// Directory to save a JSON report into
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Dispatch to command handlers
    match cli.command {
        None => commands::run::execute(cli.config.as_deref(), RunArgs::default()),
        Some(Commands::Run(args)) => commands::run::execute(cli.config.as_deref(), args),
        Some(Commands::Verify(args)) => commands::verify::execute(cli.config.as_deref(), args),
        Some(Commands::Write { strategy, matrix }) => {
            commands::write::execute(cli.config.as_deref(), &strategy, matrix)
        }
        Some(Commands::Validate { file }) => commands::validate::execute(&file),
    }
}
