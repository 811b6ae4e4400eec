// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Paperkey: collaborator abstractions for the restore path.
//!
//! The restore workflow never talks to a camera, a dialog, or a file picker
//! directly. It goes through the traits in [`traits`], so a desktop front end,
//! a command line, or a test script can each plug in their own implementation.

pub mod automatic;
pub mod files;
pub mod stub;
pub mod traits;

pub use automatic::{AssumeYes, ExpectedFingerprint, FixedDestination};
pub use files::ImageFileSource;
pub use traits::{DestinationPicker, FrameSource, SymbolDetector, VerificationPrompt};

/// Returns the live camera for this platform.
///
/// No native capture backend is linked in, so this is the stub camera which
/// reports `CameraUnavailable` on open; callers fall back to image files.
pub fn platform_camera() -> Box<dyn FrameSource> {
    Box::new(stub::StubCamera)
}
