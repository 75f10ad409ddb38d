//! Frame comparison: a structural similarity score plus a per-pixel diff.
//!
//! Rendered frames are opaque, so alpha is dropped before scoring.

use crate::{Result, VisualTestError};
use image::buffer::ConvertBuffer;
use image::{Rgba, RgbImage, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Largest per-channel difference still counted as an unchanged pixel
const CHANNEL_TOLERANCE: u8 = 10;

/// Result of comparing two frames
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose channels differ by more than the tolerance
    pub changed_pixels: usize,
}

/// Compare two frames stored as image files
pub fn compare_images(reference: &Path, captured: &Path) -> Result<CompareResult> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    compare_frames(&reference, &captured)
}

/// Compare two in-memory frames
pub fn compare_frames(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    ensure_same_size(reference, captured)?;

    let reference_rgb: RgbImage = reference.convert();
    let captured_rgb: RgbImage = captured.convert();
    let score = image_compare::rgb_similarity_structure(
        &Algorithm::MSSIMSimple,
        &reference_rgb,
        &captured_rgb,
    )
    .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?
    .score;

    let changed_pixels = reference
        .pixels()
        .zip(captured.pixels())
        .filter(|(a, b)| channel_delta(a, b) > CHANNEL_TOLERANCE)
        .count();

    Ok(CompareResult {
        similarity: score,
        changed_pixels,
    })
}

/// Changed pixels in red scaled by how far they moved; the rest as a dimmed
/// copy of `captured`.
pub fn diff_frames(reference: &RgbaImage, captured: &RgbaImage) -> Result<RgbaImage> {
    ensure_same_size(reference, captured)?;

    let (width, height) = reference.dimensions();
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let expected = reference.get_pixel(x, y);
        let actual = captured.get_pixel(x, y);
        let delta = channel_delta(expected, actual);
        if delta > CHANNEL_TOLERANCE {
            Rgba([55 + (delta as u16 * 200 / 255) as u8, 0, 0, 255])
        } else {
            Rgba([actual[0] / 3, actual[1] / 3, actual[2] / 3, 255])
        }
    }))
}

/// Write the diff of two frame files to `output`
pub fn generate_diff_image(reference: &Path, captured: &Path, output: &Path) -> Result<()> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    let diff = diff_frames(&reference, &captured)?;
    underwood::prelude::save_png(&diff, output)?;
    Ok(())
}

fn ensure_same_size(reference: &RgbaImage, captured: &RgbaImage) -> Result<()> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Frame sizes differ: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }
    Ok(())
}

fn channel_delta(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .take(3)
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    #[test]
    fn test_size_mismatch_is_an_error() {
        let result = compare_frames(&solid(4, 4, [0, 0, 0]), &solid(4, 5, [0, 0, 0]));
        assert!(matches!(result, Err(VisualTestError::Compare(_))));
    }

    #[test]
    fn test_small_deltas_are_tolerated() {
        let mut captured = solid(16, 16, [100, 100, 100]);
        captured.put_pixel(3, 3, Rgba([105, 100, 100, 255]));
        captured.put_pixel(4, 4, Rgba([200, 100, 100, 255]));
        let result = compare_frames(&solid(16, 16, [100, 100, 100]), &captured).expect("compare");
        assert_eq!(result.changed_pixels, 1);
    }

    #[test]
    fn test_diff_marks_changed_pixels() {
        let mut captured = solid(2, 1, [90, 90, 90]);
        captured.put_pixel(1, 0, Rgba([255, 90, 90, 255]));
        let diff = diff_frames(&solid(2, 1, [90, 90, 90]), &captured).expect("diff");
        assert_eq!(diff.get_pixel(0, 0).0, [30, 30, 30, 255]);
        assert_eq!(diff.get_pixel(1, 0).0, [184, 0, 0, 255]);
    }
}
