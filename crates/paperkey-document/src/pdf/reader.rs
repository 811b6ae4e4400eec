// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: inspect an existing backup using the `lopdf` crate.

use std::path::Path;

use lopdf::Document;
use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::{FINGERPRINT_LEN, Fingerprint};
use tracing::{debug, info, instrument, warn};

use crate::assemble::FINGERPRINT_LABEL;

/// Read-only view of a printed backup's PDF.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            PaperkeyError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            PaperkeyError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        Ok(Self {
            document,
            source_path: None,
        })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Text of every page, in page order.
    pub fn extract_text(&self) -> Result<String> {
        let mut page_numbers: Vec<u32> = self.document.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();
        self.document
            .extract_text(&page_numbers)
            .map_err(|err| PaperkeyError::PdfError(format!("text extraction failed: {}", err)))
    }

    /// The fingerprint printed after the `Fingerprint (SHA256):` label, if any.
    pub fn printed_fingerprint(&self) -> Result<Option<Fingerprint>> {
        let text = self.extract_text()?;
        Ok(find_labelled_fingerprint(&text))
    }

    /// Whether the printed text carries `fingerprint`.
    ///
    /// Whitespace is ignored so that line breaks inserted by text extraction
    /// don't hide a match.
    pub fn contains_fingerprint(&self, fingerprint: &Fingerprint) -> Result<bool> {
        let text: String = self
            .extract_text()?
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        let found = text.contains(&fingerprint.to_hex());
        if !found {
            warn!(%fingerprint, "fingerprint not found in PDF text");
        }
        Ok(found)
    }
}

/// Collect the 64 hex digits following the fingerprint label, skipping
/// whitespace that text extraction may insert.
fn find_labelled_fingerprint(text: &str) -> Option<Fingerprint> {
    let start = text.find(FINGERPRINT_LABEL)? + FINGERPRINT_LABEL.len();
    let hex: String = text[start..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .take_while(char::is_ascii_hexdigit)
        .take(2 * FINGERPRINT_LEN)
        .collect();
    Fingerprint::parse_hex(&hex).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_fingerprint_after_label() {
        let hex = "AB".repeat(32);
        let text = format!("File Name: k.pem\nFingerprint (SHA256): {}\n{}\n-----", &hex[..40], &hex[40..]);
        let found = find_labelled_fingerprint(&text).unwrap();
        assert_eq!(found.to_hex(), hex);
    }

    #[test]
    fn missing_or_short_fingerprint_is_none() {
        assert!(find_labelled_fingerprint("no label here").is_none());
        assert!(find_labelled_fingerprint("Fingerprint (SHA256): ABCD").is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        let result = PdfReader::from_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(PaperkeyError::PdfError(_))));
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfReader::open(dir.path().join("absent.pdf"));
        assert!(matches!(result, Err(PaperkeyError::PdfError(_))));
    }
}
