// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR barcode module: render payloads into symbols, validate scanned text,
// and detect symbols in camera frames.

pub mod decoder;
pub mod detector;
pub mod encoder;

pub use decoder::parse;
pub use detector::QrDetector;
pub use encoder::{BarcodeEncoder, BarcodeImage};
