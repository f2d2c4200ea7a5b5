//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ptm-info")]
#[command(about = "Inspect PolyTracker modules through the unified tracker format")]
pub struct Cli {
    /// TOML settings file (capacity limits, log filter)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a file is a PTM module
    Probe {
        /// Path to the file
        file: PathBuf,
    },

    /// Print song, instrument and sample metadata
    Info {
        /// Path to the PTM file
        file: PathBuf,

        /// Skip sample payload decoding
        #[arg(long)]
        no_samples: bool,
    },

    /// Dump decoded pattern cells
    Patterns {
        /// Path to the PTM file
        file: PathBuf,

        /// Only dump this pattern
        #[arg(long, short)]
        pattern: Option<usize>,
    },

    /// Print a JSON summary of the decoded module
    Json {
        /// Path to the PTM file
        file: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}
