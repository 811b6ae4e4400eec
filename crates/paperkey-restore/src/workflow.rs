// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Restore workflow state machine.
//
// Scanning -> Decoded -> Validated -> AwaitingConfirmation -> Confirmed -> Persisted
//
// Rejected and "no destination" loop back to Scanning; Failed waits for the
// caller to resume. Operations called in the wrong state return
// `InvalidState` and change nothing.

use std::fmt;
use std::path::{Path, PathBuf};

use paperkey_core::config::BackupConfig;
use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::{AttemptId, Decision, Fingerprint, KeyMaterial};
use paperkey_document::barcode::parse;
use paperkey_document::codec::Codec;
use paperkey_security::fingerprint;
use tracing::{debug, info, instrument, warn};

use crate::persist::write_key_file;

/// Where a restore attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestoreState {
    Scanning,
    Decoded,
    Validated,
    AwaitingConfirmation,
    Confirmed,
    Rejected,
    Persisted,
    Failed,
}

impl RestoreState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scanning => "scanning",
            Self::Decoded => "decoded",
            Self::Validated => "validated",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Persisted => "persisted",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RestoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded key together with its fingerprint and whether a human (or an
/// automated check) has accepted that fingerprint.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    key: KeyMaterial,
    fingerprint: Fingerprint,
    confirmed: bool,
}

impl VerificationResult {
    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// One restore attempt, from first scan to a written file.
pub struct RestoreWorkflow {
    attempt: AttemptId,
    codec: Codec,
    state: RestoreState,
    history: Vec<RestoreState>,
    pending: Option<VerificationResult>,
}

impl RestoreWorkflow {
    pub fn new(codec: Codec) -> Self {
        let attempt = AttemptId::new();
        debug!(%attempt, "restore workflow created");
        Self {
            attempt,
            codec,
            state: RestoreState::Scanning,
            history: vec![RestoreState::Scanning],
            pending: None,
        }
    }

    pub fn from_config(config: &BackupConfig) -> Self {
        Self::new(Codec::new(config.max_restored_bytes))
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn state(&self) -> RestoreState {
        self.state
    }

    /// Every state visited so far, oldest first, starting with `Scanning`.
    pub fn history(&self) -> &[RestoreState] {
        &self.history
    }

    /// The decoded key, between `Validated` and `Persisted`.
    pub fn pending(&self) -> Option<&VerificationResult> {
        self.pending.as_ref()
    }

    fn enter(&mut self, next: RestoreState) {
        debug!(attempt = %self.attempt, from = %self.state, to = %next, "restore transition");
        self.state = next;
        self.history.push(next);
    }

    fn require(&self, expected: RestoreState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(PaperkeyError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }

    /// Feed one scanned string.
    ///
    /// On success the workflow ends in `AwaitingConfirmation` and the
    /// fingerprint to show the user is returned. Any parse or decode failure
    /// moves to `Failed`.
    #[instrument(skip_all, fields(attempt = %self.attempt, scanned_len = scanned.len()))]
    pub fn submit_scan(&mut self, scanned: &str) -> Result<Fingerprint> {
        self.require(RestoreState::Scanning)?;

        let key = match parse(scanned).and_then(|text| self.codec.decode(text.as_str())) {
            Ok(key) => key,
            Err(err) => {
                self.enter(RestoreState::Failed);
                return Err(err);
            }
        };
        self.enter(RestoreState::Decoded);

        let digest = fingerprint(key.as_bytes());
        self.pending = Some(VerificationResult {
            key,
            fingerprint: digest,
            confirmed: false,
        });
        self.enter(RestoreState::Validated);

        self.enter(RestoreState::AwaitingConfirmation);
        info!(fingerprint = %digest, "key decoded, awaiting confirmation");
        Ok(digest)
    }

    /// Apply the fingerprint decision. Rejection discards the key and
    /// returns to `Scanning`.
    pub fn confirm(&mut self, decision: Decision) -> Result<RestoreState> {
        self.require(RestoreState::AwaitingConfirmation)?;
        match decision {
            Decision::Confirm => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.confirmed = true;
                }
                self.enter(RestoreState::Confirmed);
            }
            Decision::Reject => {
                warn!(attempt = %self.attempt, "fingerprint rejected, discarding decoded key");
                self.pending = None;
                self.enter(RestoreState::Rejected);
                self.enter(RestoreState::Scanning);
            }
        }
        Ok(self.state)
    }

    /// Write the confirmed key to `destination`.
    ///
    /// `None` means the user declined to save: the key is discarded and the
    /// workflow returns to `Scanning`. A failed write moves to `Failed`.
    pub fn persist(&mut self, destination: Option<&Path>) -> Result<Option<PathBuf>> {
        self.require(RestoreState::Confirmed)?;

        let Some(path) = destination else {
            info!(attempt = %self.attempt, "no destination chosen, back to scanning");
            self.pending = None;
            self.enter(RestoreState::Scanning);
            return Ok(None);
        };

        let Some(pending) = self.pending.as_ref().filter(|p| p.confirmed) else {
            return Err(PaperkeyError::InvalidState {
                expected: RestoreState::Confirmed.name(),
                actual: "confirmed without a decoded key",
            });
        };

        match write_key_file(path, pending.key.as_bytes()) {
            Ok(()) => {
                info!(
                    attempt = %self.attempt,
                    fingerprint = %pending.fingerprint,
                    path = %path.display(),
                    "key restored"
                );
                self.enter(RestoreState::Persisted);
                Ok(Some(path.to_path_buf()))
            }
            Err(err) => {
                self.enter(RestoreState::Failed);
                Err(err)
            }
        }
    }

    /// Leave `Failed` and scan again.
    pub fn resume_scanning(&mut self) -> Result<()> {
        self.require(RestoreState::Failed)?;
        self.pending = None;
        self.enter(RestoreState::Scanning);
        Ok(())
    }
}
