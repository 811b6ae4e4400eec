// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub camera for builds without a native capture backend.

use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::Frame;

use crate::traits::FrameSource;

/// Camera that is never available.
pub struct StubCamera;

impl FrameSource for StubCamera {
    fn open(&mut self) -> Result<()> {
        tracing::warn!("FrameSource::open called on stub camera");
        Err(PaperkeyError::CameraUnavailable(
            "no camera backend on this platform".into(),
        ))
    }

    fn grab(&mut self) -> Result<Option<Frame>> {
        Err(PaperkeyError::CameraUnavailable("camera was never opened".into()))
    }

    fn release(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_camera_cannot_open() {
        let mut camera = StubCamera;
        assert!(matches!(
            camera.open(),
            Err(PaperkeyError::CameraUnavailable(_))
        ));
    }
}
