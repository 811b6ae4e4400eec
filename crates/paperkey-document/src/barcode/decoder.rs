// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanned-text adapter: syntactic checks on whatever string the scanner
// pulled out of a frame, before the codec does the real work.

use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::EncodedText;

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}

/// Turn raw scanner output into an [`EncodedText`].
///
/// Trims surrounding whitespace (some readers append a newline) and rejects
/// empty text or characters outside the base64 alphabet. Stateless, so it can
/// run on every frame.
pub fn parse(scanned: &str) -> Result<EncodedText> {
    let trimmed = scanned.trim();
    if trimmed.is_empty() {
        return Err(PaperkeyError::Decode("scanned text is empty".into()));
    }
    if let Some((index, bad)) = trimmed.char_indices().find(|(_, c)| !is_base64_char(*c)) {
        return Err(PaperkeyError::Decode(format!(
            "invalid character {bad:?} at offset {index}"
        )));
    }
    Ok(EncodedText::new(trimmed))
}
