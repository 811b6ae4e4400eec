// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame enhancement: grayscale conversion, denoising, downscaling, and
// adaptive binarization for photos of printed QR codes taken under uneven
// light.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;
use imageproc::integral_image::{integral_image, sum_image_pixels};
use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::Frame;
use tracing::{debug, instrument};

/// Grayscale working copy of a camera frame.
///
/// Operations consume `self` and return the transformed enhancer, so they
/// chain: `FrameEnhancer::from_frame(&f)?.denoise(1.0).binarize(15, 10)`.
pub struct FrameEnhancer {
    image: GrayImage,
}

impl FrameEnhancer {
    // -- Construction ---------------------------------------------------------

    /// Convert a frame of any supported pixel format to grayscale.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let image = GrayImage::from_raw(frame.width(), frame.height(), frame.to_luma())
            .ok_or_else(|| {
                PaperkeyError::ImageError(format!(
                    "frame buffer does not match {}x{}",
                    frame.width(),
                    frame.height()
                ))
            })?;
        Ok(Self { image })
    }

    pub fn from_gray(image: GrayImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_gray(self) -> GrayImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Shrink so the longer side is at most `max_side` pixels. Smaller frames
    /// pass through untouched.
    pub fn downscale_to(self, max_side: u32) -> Self {
        let (w, h) = self.image.dimensions();
        let longest = w.max(h);
        if longest <= max_side || max_side == 0 {
            return self;
        }
        let scale = max_side as f32 / longest as f32;
        let new_w = ((w as f32 * scale).round() as u32).max(1);
        let new_h = ((h as f32 * scale).round() as u32).max(1);
        debug!(from_w = w, from_h = h, new_w, new_h, "downscaling frame");
        Self {
            image: imageops::resize(&self.image, new_w, new_h, FilterType::Triangle),
        }
    }

    /// Gaussian blur to suppress sensor noise and paper texture.
    pub fn denoise(self, sigma: f32) -> Self {
        if sigma <= 0.0 {
            return self;
        }
        Self {
            image: gaussian_blur_f32(&self.image, sigma),
        }
    }

    /// Adaptive thresholding to pure black and white.
    ///
    /// A pixel turns black when it is darker than the mean of the
    /// `(2 * block_radius + 1)` square around it minus `c`. Squares are
    /// clipped at the frame edge.
    #[instrument(skip(self), fields(block_radius, c))]
    pub fn binarize(self, block_radius: u32, c: i32) -> Self {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return self;
        }
        let sums = integral_image::<_, u64>(&self.image);

        let output = GrayImage::from_fn(width, height, |x, y| {
            let left = x.saturating_sub(block_radius);
            let top = y.saturating_sub(block_radius);
            let right = x.saturating_add(block_radius).min(width - 1);
            let bottom = y.saturating_add(block_radius).min(height - 1);
            let area = u64::from(right - left + 1) * u64::from(bottom - top + 1);
            let mean = sum_image_pixels(&sums, left, top, right, bottom)[0] / area;

            let threshold = mean as i32 - c;
            let value = i32::from(self.image.get_pixel(x, y).0[0]);
            Luma([if value < threshold { 0u8 } else { 255u8 }])
        });

        debug!(width, height, "binarization complete");
        Self { image: output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperkey_core::types::PixelFormat;

    #[test]
    fn from_frame_converts_rgb_to_gray() {
        let frame = Frame::new(2, 1, PixelFormat::Rgb8, vec![255, 255, 255, 0, 0, 0]).unwrap();
        let gray = FrameEnhancer::from_frame(&frame).unwrap().into_gray();
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn binarize_separates_dark_square_under_gradient() {
        // Left-to-right lighting gradient with a dark square in the middle.
        let mut img = GrayImage::from_fn(60, 60, |x, _| Luma([(120 + x * 2) as u8]));
        for y in 25..35 {
            for x in 25..35 {
                img.put_pixel(x, y, Luma([40u8]));
            }
        }
        let out = FrameEnhancer::from_gray(img).binarize(15, 20).into_gray();
        assert_eq!(out.get_pixel(30, 30).0[0], 0);
        assert_eq!(out.get_pixel(5, 5).0[0], 255);
        assert!(out.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn downscale_caps_longest_side() {
        let img = GrayImage::from_pixel(400, 200, Luma([200u8]));
        let out = FrameEnhancer::from_gray(img).downscale_to(100).into_gray();
        assert_eq!(out.dimensions(), (100, 50));
    }

    #[test]
    fn downscale_leaves_small_frames_alone() {
        let img = GrayImage::from_pixel(40, 20, Luma([200u8]));
        let out = FrameEnhancer::from_gray(img).downscale_to(100).into_gray();
        assert_eq!(out.dimensions(), (40, 20));
    }

    #[test]
    fn binarize_turns_flat_paper_white() {
        let img = GrayImage::from_pixel(10, 10, Luma([77u8]));
        let out = FrameEnhancer::from_gray(img).binarize(3, 10).into_gray();
        assert!(out.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn binarize_handles_radius_larger_than_frame() {
        let mut img = GrayImage::from_pixel(4, 4, Luma([220u8]));
        img.put_pixel(0, 0, Luma([10u8]));
        let out = FrameEnhancer::from_gray(img).binarize(50, 5).into_gray();
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(3, 3).0[0], 255);
    }

    #[test]
    fn binarize_passes_empty_frame_through() {
        let out = FrameEnhancer::from_gray(GrayImage::new(0, 0)).binarize(15, 10).into_gray();
        assert_eq!(out.dimensions(), (0, 0));
    }
}
