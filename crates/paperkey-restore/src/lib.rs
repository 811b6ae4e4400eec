// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// paperkey-restore: Getting a key back off paper.
//
// The workflow state machine guarantees nothing is written before the
// fingerprint has been computed and confirmed. The scan loop feeds it camera
// frames; the session drives prompts and persistence around both.

pub mod persist;
pub mod scanner;
pub mod session;
pub mod workflow;

pub use scanner::{ScanLoop, ScanOutcome, StopHandle};
pub use session::{RestoreOutcome, RestoreReport, RestoreSession};
pub use workflow::{RestoreState, RestoreWorkflow, VerificationResult};
