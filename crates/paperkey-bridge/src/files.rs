// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image files as a frame source: restore from photos or scans of the page
// when no live camera is available.

use std::collections::VecDeque;
use std::path::PathBuf;

use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::{Frame, PixelFormat};
use tracing::{debug, info, instrument};

use crate::traits::FrameSource;

/// Plays back a list of image files, one frame per file, then ends.
///
/// A file that fails to load is consumed and reported as
/// [`PaperkeyError::ImageError`], so the next `grab` moves on to the
/// following file.
pub struct ImageFileSource {
    pending: VecDeque<PathBuf>,
    opened: bool,
}

impl ImageFileSource {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: paths.into_iter().collect(),
            opened: false,
        }
    }

    /// Files not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageFileSource {
    fn open(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Err(PaperkeyError::CameraUnavailable(
                "no image files to scan".into(),
            ));
        }
        info!(files = self.pending.len(), "image source opened");
        self.opened = true;
        Ok(())
    }

    #[instrument(skip(self))]
    fn grab(&mut self) -> Result<Option<Frame>> {
        if !self.opened {
            return Err(PaperkeyError::CameraUnavailable(
                "image source is not open".into(),
            ));
        }
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        // Blocking read and decode on the caller's thread. A multi-task
        // runtime driving the scan loop should wrap this in spawn_blocking.
        let rgb = image::open(&path)
            .map_err(|err| {
                PaperkeyError::ImageError(format!("failed to open {}: {}", path.display(), err))
            })?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        debug!(path = %path.display(), width, height, "frame loaded");
        Frame::new(width, height, PixelFormat::Rgb8, rgb.into_raw()).map(Some)
    }

    fn release(&mut self) {
        self.opened = false;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn empty_list_is_unavailable() {
        let mut source = ImageFileSource::new(Vec::new());
        assert!(matches!(
            source.open(),
            Err(PaperkeyError::CameraUnavailable(_))
        ));
    }

    #[test]
    fn plays_back_files_then_ends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        GrayImage::from_pixel(8, 6, Luma([255u8])).save(&path).unwrap();

        let mut source = ImageFileSource::new(vec![path]);
        source.open().unwrap();
        assert_eq!(source.remaining(), 1);
        let frame = source.grab().unwrap().expect("one frame");
        assert_eq!(source.remaining(), 0);
        assert_eq!((frame.width(), frame.height()), (8, 6));
        assert_eq!(frame.format(), PixelFormat::Rgb8);
        assert!(source.grab().unwrap().is_none());
        source.release();
    }

    #[test]
    fn unreadable_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let good = dir.path().join("good.png");
        GrayImage::from_pixel(4, 4, Luma([0u8])).save(&good).unwrap();

        let mut source = ImageFileSource::new(vec![path, good]);
        source.open().unwrap();
        assert!(matches!(source.grab(), Err(PaperkeyError::ImageError(_))));
        assert_eq!(source.remaining(), 1);
        assert!(source.grab().unwrap().is_some());
    }
}
