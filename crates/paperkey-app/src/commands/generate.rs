// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `paperkey generate`: key file in, printable PDF out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use paperkey_core::config::BackupConfig;
use paperkey_core::types::KeyMaterial;
use paperkey_document::BackupGenerator;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// PEM key file to back up
    pub key: PathBuf,

    /// Where to write the PDF
    #[arg(short, long)]
    pub output: PathBuf,

    /// Notes printed on the page (first 5 lines kept)
    #[arg(long, conflicts_with = "notes_file")]
    pub notes: Option<String>,

    /// Read notes from a file instead
    #[arg(long)]
    pub notes_file: Option<PathBuf>,

    /// Also export the QR code as a PNG
    #[arg(long)]
    pub png: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, config: &BackupConfig) -> Result<()> {
    let key = KeyMaterial::load(&args.key)
        .with_context(|| format!("reading key file {}", args.key.display()))?;

    let notes = match (&args.notes, &args.notes_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading notes file {}", path.display()))?,
        (None, None) => String::new(),
    };

    let filename = args
        .key
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.key.display().to_string());
    let timestamp = chrono::Local::now().naive_local();

    let artifact = BackupGenerator::from_config(config)
        .generate(&key, &filename, &notes, timestamp)
        .context("generating backup")?;
    artifact
        .write_to(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let barcode = artifact.payload.barcode();
    if let Some(png) = &args.png {
        let bytes = barcode.to_png_bytes(config.module_pixels)?;
        std::fs::write(png, bytes).with_context(|| format!("writing {}", png.display()))?;
        println!("QR code:     {}", png.display());
    }

    println!("Backup:      {}", args.output.display());
    println!(
        "QR symbol:   version {}, error correction {}",
        barcode.version(),
        barcode.ec_level()
    );
    println!("Fingerprint: {}", artifact.payload.fingerprint().grouped());
    Ok(())
}
