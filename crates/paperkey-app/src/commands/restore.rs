// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `paperkey restore`: scan, confirm the fingerprint, save.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use paperkey_bridge::traits::{DestinationPicker, FrameSource, VerificationPrompt};
use paperkey_bridge::{AssumeYes, ExpectedFingerprint, FixedDestination, ImageFileSource};
use paperkey_core::config::BackupConfig;
use paperkey_core::types::Fingerprint;
use paperkey_document::QrDetector;
use paperkey_restore::{RestoreOutcome, RestoreSession};
use tracing::info;

use crate::services::console::ConsolePrompt;

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Photos or scans of the page; the camera is used when none are given
    pub images: Vec<PathBuf>,

    /// Where to save the restored key (asked interactively otherwise)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fingerprint printed on the paper; confirms automatically when it matches
    #[arg(long, conflicts_with = "yes")]
    pub expect_fingerprint: Option<String>,

    /// Accept the restored fingerprint without asking
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn run(args: RestoreArgs, config: &BackupConfig) -> Result<()> {
    let prompt: Box<dyn VerificationPrompt> = match (&args.expect_fingerprint, args.yes) {
        (Some(hex), _) => Box::new(ExpectedFingerprint(Fingerprint::parse_hex(hex)?)),
        (None, true) => Box::new(AssumeYes),
        (None, false) => Box::new(ConsolePrompt::stdio()),
    };
    let picker: Box<dyn DestinationPicker> = match args.output {
        Some(path) => Box::new(FixedDestination(Some(path))),
        None => Box::new(ConsolePrompt::stdio()),
    };
    let mut source: Box<dyn FrameSource> = if args.images.is_empty() {
        paperkey_bridge::platform_camera()
    } else {
        Box::new(ImageFileSource::new(args.images))
    };

    let mut session = RestoreSession::from_config(QrDetector::new(), prompt, picker, config);
    let report = session.run(&mut source).await?;
    info!(attempt = %report.attempt, states = report.history.len(), "restore finished");

    match report.outcome {
        RestoreOutcome::Persisted { path, fingerprint } => {
            println!("Restored:    {}", path.display());
            println!("Fingerprint: {}", fingerprint.grouped());
            Ok(())
        }
        RestoreOutcome::Cancelled => bail!("restore cancelled"),
        RestoreOutcome::SourceEnded => {
            if report.rejected > 0 || report.declined > 0 {
                bail!(
                    "no key saved ({} rejected, {} not saved)",
                    report.rejected,
                    report.declined
                )
            }
            bail!("no readable backup QR code found in the given images")
        }
    }
}
