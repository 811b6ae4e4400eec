// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Key fingerprints: SHA-256 over the canonical decompressed UTF-8 bytes.

use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::{FINGERPRINT_LEN, Fingerprint};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Compute the SHA-256 fingerprint of `data`.
///
/// Both the generate and the restore path call this on the plain key text,
/// never on the compressed or base64 form, so the two sides stay comparable.
pub fn fingerprint(data: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut digest = [0u8; FINGERPRINT_LEN];
    digest.copy_from_slice(&hasher.finalize());
    Fingerprint::from_digest(digest)
}

/// Check `data` against a fingerprint copied from paper.
///
/// Returns the computed fingerprint when it matches, or
/// `Err(PaperkeyError::IntegrityMismatch)` with both values when it does not.
pub fn verify_fingerprint(data: &[u8], expected_hex: &str) -> Result<Fingerprint> {
    let expected = Fingerprint::parse_hex(expected_hex)?;
    let actual = fingerprint(data);
    if actual == expected {
        debug!(fingerprint = %actual, "fingerprint verified");
        Ok(actual)
    } else {
        Err(PaperkeyError::IntegrityMismatch {
            expected: expected.to_hex(),
            actual: actual.to_hex(),
        })
    }
}
