// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Paperkey.

use thiserror::Error;

use crate::types::EcLevel;

/// Top-level error type for all Paperkey operations.
#[derive(Debug, Error)]
pub enum PaperkeyError {
    // -- Key material --
    #[error("not a PEM-style key file: {0}")]
    InvalidFormat(String),

    #[error("text is not valid UTF-8: {0}")]
    Encoding(String),

    // -- Payload codec --
    #[error("compression failed: {0}")]
    Compression(String),

    #[error("decompression failed: {0}")]
    Decompression(String),

    #[error("payload is not valid base64: {0}")]
    Decode(String),

    // -- Barcode --
    #[error(
        "payload of {payload_len} bytes does not fit a QR symbol at level {ec_level} (max version {max_version})"
    )]
    PayloadTooLarge {
        payload_len: usize,
        ec_level: EcLevel,
        max_version: u8,
    },

    #[error("barcode rendering failed: {0}")]
    Barcode(String),

    // -- Restoration --
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("restore workflow is {actual}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("not a valid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("fingerprint mismatch: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    // -- Document --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PaperkeyError>;
