// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paperkey: paper backups for private keys
//
// Entry point. Initialises logging, loads the configuration, and dispatches
// the subcommand.

mod commands;
mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paperkey_core::config::BackupConfig;
use paperkey_core::error::PaperkeyError;
use paperkey_core::human_errors::humanize_error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::generate::GenerateArgs;
use commands::restore::RestoreArgs;

/// paperkey - paper backups for private keys
#[derive(Parser, Debug)]
#[command(name = "paperkey")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a printable PDF backup of a key file
    Generate(GenerateArgs),

    /// Restore a key from a photo, scan or camera view of a backup
    Restore(RestoreArgs),

    /// Decode a scanned payload string and print its fingerprint
    Decode {
        /// The scanned text, or `-` to read it from stdin
        text: String,
    },

    /// Print the SHA-256 fingerprint of a file
    Fingerprint {
        file: PathBuf,

        /// Fail unless the file has this fingerprint
        #[arg(long)]
        expect: Option<String>,
    },

    /// Show what a backup PDF contains
    Inspect {
        pdf: PathBuf,

        /// Fail unless the PDF carries this fingerprint
        #[arg(long)]
        expect_fingerprint: Option<String>,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(services::config_dir::config_path);
    let config = BackupConfig::load_or_default(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, &config),
        Commands::Restore(args) => commands::restore::run(args, &config).await,
        Commands::Decode { text } => commands::inspect::decode(&text, &config),
        Commands::Fingerprint { file, expect } => {
            commands::inspect::fingerprint_file(&file, expect.as_deref())
        }
        Commands::Inspect {
            pdf,
            expect_fingerprint,
        } => commands::inspect::inspect(&pdf, expect_fingerprint.as_deref()),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Print the plain-English form of a library error, or the error chain.
fn report(err: &anyhow::Error) {
    match err.chain().find_map(|cause| cause.downcast_ref::<PaperkeyError>()) {
        Some(paperkey_err) => {
            let human = humanize_error(paperkey_err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            eprintln!("  ({err:#})");
        }
        None => eprintln!("error: {err:#}"),
    }
}
