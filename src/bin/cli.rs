// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Polyface CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polyface")]
#[command(about = "Polyface - procedural per-face mesh extrusion kernel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a job file and write the outputs
    Run {
        /// Input job file (JSON)
        input: PathBuf,

        /// Output file for the batch results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also export the first result mesh as binary STL
        #[arg(long)]
        stl: Option<PathBuf>,

        /// Spread batch items over the rayon thread pool
        #[arg(long)]
        parallel: bool,
    },

    /// Summarize a job file without running it
    Info {
        /// Input job file (JSON)
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run {
            input,
            output,
            stl,
            parallel,
        } => polyface::cli::run_command(
            input,
            output.as_deref(),
            stl.as_deref(),
            *parallel,
            cli.verbose,
        ),
        Commands::Info { input } => polyface::cli::info_command(input),
        Commands::Version => {
            println!("polyface {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
