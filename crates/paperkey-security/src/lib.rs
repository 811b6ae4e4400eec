// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// paperkey-security: content fingerprints that tie a printed backup to the
// key it was made from.

pub mod integrity;

pub use integrity::{fingerprint, verify_fingerprint};
