//! CLI for the vidsniff media discovery assistant.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use vidsniff_core::config;

use commands::{run_fetch, run_scan};

/// Top-level CLI for the vidsniff media discovery assistant.
#[derive(Debug, Parser)]
#[command(name = "vidsniff")]
#[command(about = "vidsniff: discover and download media URLs from browser captures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Replay a browser capture (HAR) and print the reconciled catalog.
    Scan {
        /// Path to the capture file.
        path: String,
    },

    /// Replay a capture, then download one catalog entry.
    Fetch {
        /// Path to the capture file.
        path: String,

        /// Content id of the entry to download.
        #[arg(long, conflicts_with = "index")]
        id: Option<String>,

        /// Zero-based index into the scanned catalog (default 0).
        #[arg(long)]
        index: Option<usize>,

        /// Output directory (default: current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<String>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scan { path } => run_scan(&cfg, Path::new(&path)),
            CliCommand::Fetch {
                path,
                id,
                index,
                out,
            } => run_fetch(
                &cfg,
                Path::new(&path),
                id.as_deref(),
                index,
                out.as_deref(),
            ),
        }
    }
}
