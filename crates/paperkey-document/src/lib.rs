// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// paperkey-document: Everything between key text and paper.
//
// Provides the compact payload codec (gzip + base64), QR symbol rendering and
// detection, frame enhancement for scanning, page assembly and PDF output.

pub mod assemble;
pub mod backup;
pub mod barcode;
pub mod codec;
pub mod pdf;
pub mod scan;

// Re-export the primary structs so callers can use `paperkey_document::Codec` etc.
pub use assemble::{DocumentAssembler, DocumentPayload};
pub use backup::{BackupArtifact, BackupGenerator};
pub use barcode::{BarcodeEncoder, BarcodeImage, QrDetector};
pub use codec::Codec;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
pub use scan::enhance::FrameEnhancer;
