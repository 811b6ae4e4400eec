// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR detection in camera frames via `rqrr`, with a binarized second pass for
// frames the plain grayscale pass cannot read.

use image::GrayImage;
use paperkey_bridge::traits::SymbolDetector;
use paperkey_core::types::{Frame, ScanCandidate};
use tracing::{debug, instrument};

use crate::scan::enhance::FrameEnhancer;

/// Frames larger than this on their longest side are shrunk before detection.
const DEFAULT_MAX_SIDE: u32 = 1600;

/// Stateless QR reader for camera frames.
#[derive(Debug, Clone, Copy)]
pub struct QrDetector {
    max_side: u32,
    block_radius: u32,
    threshold_offset: i32,
}

impl Default for QrDetector {
    fn default() -> Self {
        Self {
            max_side: DEFAULT_MAX_SIDE,
            block_radius: 15,
            threshold_offset: 10,
        }
    }
}

impl QrDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every decodable symbol in a grayscale image.
    pub fn detect_gray(&self, gray: &GrayImage) -> Vec<ScanCandidate> {
        let (w, h) = gray.dimensions();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
                gray.get_pixel(x as u32, y as u32).0[0]
            });
        let grids = prepared.detect_grids();
        debug!(grids = grids.len(), "QR grids located");

        grids
            .iter()
            .filter_map(|grid| match grid.decode() {
                Ok((_meta, text)) => {
                    debug!(len = text.len(), "QR grid decoded");
                    let b = grid.bounds;
                    Some(ScanCandidate {
                        text,
                        corners: Some([
                            (b[0].x, b[0].y),
                            (b[1].x, b[1].y),
                            (b[2].x, b[2].y),
                            (b[3].x, b[3].y),
                        ]),
                    })
                }
                Err(err) => {
                    debug!(error = ?err, "QR grid located but not decodable");
                    None
                }
            })
            .collect()
    }
}

impl SymbolDetector for QrDetector {
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    fn detect(&self, frame: &Frame) -> Vec<ScanCandidate> {
        let enhancer = match FrameEnhancer::from_frame(frame) {
            Ok(e) => e.downscale_to(self.max_side),
            Err(err) => {
                debug!(error = %err, "frame skipped");
                return Vec::new();
            }
        };

        let found = self.detect_gray(enhancer.as_gray());
        if !found.is_empty() {
            return found;
        }

        let binary = enhancer
            .denoise(1.0)
            .binarize(self.block_radius, self.threshold_offset);
        self.detect_gray(binary.as_gray())
    }
}
