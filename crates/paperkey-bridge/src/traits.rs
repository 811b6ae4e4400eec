// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the restore collaborators.

use std::path::PathBuf;

use paperkey_core::error::Result;
use paperkey_core::types::{Decision, Fingerprint, Frame, ScanCandidate};

/// A camera, or anything else that produces frames on demand.
///
/// The scan loop calls `open` once, `grab` once per iteration, and `release`
/// exactly once after a successful `open`, whatever way the loop ends.
pub trait FrameSource {
    /// Acquire the device. Fails with `PaperkeyError::CameraUnavailable`
    /// when it cannot be opened.
    fn open(&mut self) -> Result<()>;

    /// Fetch the next frame. `Ok(None)` means the source has ended.
    fn grab(&mut self) -> Result<Option<Frame>>;

    /// Release the device.
    fn release(&mut self);
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn grab(&mut self) -> Result<Option<Frame>> {
        (**self).grab()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Finds and reads 2D symbols in a frame.
///
/// Must not block or keep state between calls; an empty result just means
/// "nothing readable in this frame".
pub trait SymbolDetector {
    fn detect(&self, frame: &Frame) -> Vec<ScanCandidate>;
}

/// Shows the restored fingerprint next to the printed one and asks whether
/// they match.
pub trait VerificationPrompt {
    fn confirm_fingerprint(&mut self, fingerprint: &Fingerprint) -> Result<Decision>;
}

impl<P: VerificationPrompt + ?Sized> VerificationPrompt for Box<P> {
    fn confirm_fingerprint(&mut self, fingerprint: &Fingerprint) -> Result<Decision> {
        (**self).confirm_fingerprint(fingerprint)
    }
}

/// Asks where to save the restored key. `Ok(None)` means the user declined.
pub trait DestinationPicker {
    fn choose_destination(&mut self) -> Result<Option<PathBuf>>;
}

impl<K: DestinationPicker + ?Sized> DestinationPicker for Box<K> {
    fn choose_destination(&mut self) -> Result<Option<PathBuf>> {
        (**self).choose_destination()
    }
}
