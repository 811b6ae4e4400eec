// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Restore session: scan, ask, save, repeat until a key is written or the
// source runs dry.

use std::path::PathBuf;

use paperkey_bridge::traits::{DestinationPicker, FrameSource, SymbolDetector, VerificationPrompt};
use paperkey_core::config::BackupConfig;
use paperkey_core::error::Result;
use paperkey_core::types::{AttemptId, Fingerprint};
use tracing::{info, instrument, warn};

use crate::scanner::{CameraLease, ScanLoop, ScanOutcome, StopHandle};
use crate::workflow::{RestoreState, RestoreWorkflow};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Persisted { path: PathBuf, fingerprint: Fingerprint },
    Cancelled,
    SourceEnded,
}

/// Summary handed back to the front end.
#[derive(Debug, Clone)]
pub struct RestoreReport {
    pub attempt: AttemptId,
    pub outcome: RestoreOutcome,
    /// Decoded keys whose fingerprint was rejected.
    pub rejected: usize,
    /// Confirmed keys the user chose not to save.
    pub declined: usize,
    pub history: Vec<RestoreState>,
}

/// Wires a scan loop to the confirmation prompt and destination picker.
///
/// The frame source is opened once and held for the whole session, across
/// rejections and declined saves.
pub struct RestoreSession<D, P, K> {
    scan_loop: ScanLoop<D>,
    prompt: P,
    picker: K,
    workflow: RestoreWorkflow,
}

impl<D, P, K> RestoreSession<D, P, K>
where
    D: SymbolDetector,
    P: VerificationPrompt,
    K: DestinationPicker,
{
    pub fn new(scan_loop: ScanLoop<D>, prompt: P, picker: K, workflow: RestoreWorkflow) -> Self {
        Self {
            scan_loop,
            prompt,
            picker,
            workflow,
        }
    }

    pub fn from_config(detector: D, prompt: P, picker: K, config: &BackupConfig) -> Self {
        Self::new(
            ScanLoop::from_config(detector, config),
            prompt,
            picker,
            RestoreWorkflow::from_config(config),
        )
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.scan_loop.stop_handle()
    }

    /// The underlying workflow; its history survives a failed run.
    pub fn workflow(&self) -> &RestoreWorkflow {
        &self.workflow
    }

    #[instrument(skip_all, fields(attempt = %self.workflow.attempt()))]
    pub async fn run<S: FrameSource + ?Sized>(&mut self, source: &mut S) -> Result<RestoreReport> {
        let mut lease = CameraLease::acquire(source)?;
        let mut rejected = 0;
        let mut declined = 0;

        let outcome = loop {
            let fingerprint = match self.scan_loop.scan(&mut *lease, &mut self.workflow).await? {
                ScanOutcome::Found(fingerprint) => fingerprint,
                ScanOutcome::Cancelled => break RestoreOutcome::Cancelled,
                ScanOutcome::SourceEnded => break RestoreOutcome::SourceEnded,
            };

            let decision = self.prompt.confirm_fingerprint(&fingerprint)?;
            if self.workflow.confirm(decision)? == RestoreState::Scanning {
                rejected += 1;
                continue;
            }

            let destination = self.picker.choose_destination()?;
            match self.workflow.persist(destination.as_deref())? {
                Some(path) => break RestoreOutcome::Persisted { path, fingerprint },
                None => {
                    declined += 1;
                    warn!(%fingerprint, "restored key not saved, scanning again");
                }
            }
        };

        info!(?outcome, rejected, declined, "restore session finished");
        Ok(RestoreReport {
            attempt: self.workflow.attempt(),
            outcome,
            rejected,
            declined,
            history: self.workflow.history().to_vec(),
        })
    }
}
