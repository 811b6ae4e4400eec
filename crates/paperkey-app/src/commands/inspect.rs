// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-only helpers: `decode`, `fingerprint` and `inspect`.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use paperkey_core::config::BackupConfig;
use paperkey_core::types::Fingerprint;
use paperkey_document::barcode::parse;
use paperkey_document::{Codec, PdfReader};
use paperkey_security::{fingerprint, verify_fingerprint};

/// Decode a payload string as a scanner would read it and show its fingerprint.
/// `-` reads the payload from stdin.
pub fn decode(text: &str, config: &BackupConfig) -> Result<()> {
    let scanned = if text == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading payload from stdin")?;
        buf
    } else {
        text.to_owned()
    };

    let encoded = parse(&scanned)?;
    let key = Codec::new(config.max_restored_bytes).decode(encoded.as_str())?;
    println!("Decoded {} bytes of key text", key.len());
    println!("Fingerprint: {}", fingerprint(key.as_bytes()).grouped());
    Ok(())
}

pub fn fingerprint_file(path: &Path, expected: Option<&str>) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let digest = match expected {
        Some(hex) => verify_fingerprint(&bytes, hex)?,
        None => fingerprint(&bytes),
    };
    println!("{digest}");
    Ok(())
}

/// Report page count and the printed fingerprint of a backup PDF.
pub fn inspect(path: &Path, expected: Option<&str>) -> Result<()> {
    let reader = PdfReader::open(path)?;
    println!("Pages:       {}", reader.page_count());

    match reader.printed_fingerprint()? {
        Some(printed) => println!("Fingerprint: {}", printed.grouped()),
        None => println!("Fingerprint: not found"),
    }

    if let Some(hex) = expected {
        let expected = Fingerprint::parse_hex(hex)?;
        if !reader.contains_fingerprint(&expected)? {
            bail!("{} does not carry fingerprint {}", path.display(), expected.grouped());
        }
        println!("Fingerprint matches.");
    }
    Ok(())
}
