//! Pure dimension math for image fitting.
//!
//! Crop boxes are computed in floating point and snapped to whole pixels
//! with round-half-to-even, so results are deterministic for a given input.

/// A crop box in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    /// Left edge
    pub left: u32,
    /// Top edge
    pub top: u32,
    /// Width of the box
    pub width: u32,
    /// Height of the box
    pub height: u32,
}

/// Snap a `[start, start + length)` span to pixels inside `0..limit`.
fn snap(start: f64, length: f64, limit: u32) -> (u32, u32) {
    let lower = start.round_ties_even().clamp(0.0, f64::from(limit));
    let upper = (start + length).round_ties_even().clamp(0.0, f64::from(limit));
    let lower = lower as u32;
    let size = (upper as u32).saturating_sub(lower).max(1);
    (lower.min(limit.saturating_sub(1)), size)
}

/// Crop box that gives a source image the target aspect ratio.
///
/// A relatively wider source loses equal strips on the left and right.
/// A relatively taller (or equally proportioned) source loses strips from
/// the top and bottom, with only a third of the removed height taken from
/// the top so the lower part of the image stays in view.
///
/// # Examples
///
/// ```
/// use ambry_transform::{CropRect, cover_crop};
///
/// let crop = cover_crop(400, 200, 100, 100);
/// assert_eq!(crop, CropRect { left: 100, top: 0, width: 200, height: 200 });
/// ```
pub fn cover_crop(source_width: u32, source_height: u32, width: u32, height: u32) -> CropRect {
    let target_ratio = f64::from(width) / f64::from(height);
    let source_ratio = f64::from(source_width) / f64::from(source_height);

    if source_ratio > target_ratio {
        let projected_width = f64::from(source_height) * target_ratio;
        let left = (f64::from(source_width) - projected_width) / 2.0;
        let (left, crop_width) = snap(left, projected_width, source_width);
        CropRect {
            left,
            top: 0,
            width: crop_width,
            height: source_height,
        }
    } else {
        let projected_height = f64::from(source_width) / target_ratio;
        let top = (f64::from(source_height) - projected_height) / 3.0;
        let (top, crop_height) = snap(top, projected_height, source_height);
        CropRect {
            left: 0,
            top,
            width: source_width,
            height: crop_height,
        }
    }
}

/// Output size that fits a source image inside the target box.
///
/// The dimension that is relatively larger matches its target exactly and
/// the other is scaled down with the source aspect ratio, truncated to whole
/// pixels (never below one).
///
/// # Examples
///
/// ```
/// use ambry_transform::contain_size;
///
/// assert_eq!(contain_size(400, 200, 100, 100), (100, 50));
/// assert_eq!(contain_size(200, 400, 100, 100), (50, 100));
/// ```
pub fn contain_size(source_width: u32, source_height: u32, width: u32, height: u32) -> (u32, u32) {
    let target_ratio = f64::from(width) / f64::from(height);
    let source_ratio = f64::from(source_width) / f64::from(source_height);

    if source_ratio > target_ratio {
        let scaled_height = (f64::from(width) / source_ratio) as u32;
        (width, scaled_height.max(1))
    } else {
        let scaled_width = (f64::from(height) * source_ratio) as u32;
        (scaled_width.max(1), height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_wider_source_crops_sides_centered() {
        assert_eq!(
            cover_crop(400, 200, 100, 100),
            CropRect {
                left: 100,
                top: 0,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_cover_taller_source_biases_toward_bottom() {
        // 200 rows removed, 66.67 from the top
        assert_eq!(
            cover_crop(200, 400, 100, 100),
            CropRect {
                left: 0,
                top: 67,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_cover_equal_ratio_keeps_everything() {
        assert_eq!(
            cover_crop(300, 150, 200, 100),
            CropRect {
                left: 0,
                top: 0,
                width: 300,
                height: 150
            }
        );
    }

    #[test]
    fn test_cover_half_pixel_rounds_to_even() {
        // projected width 99, left edge 0.5 -> 0, right edge 99.5 -> 100
        let crop = cover_crop(100, 99, 1, 1);
        assert_eq!(crop.left, 0);
        assert_eq!(crop.width, 100);
    }

    #[test]
    fn test_cover_extreme_ratio_never_empty() {
        let crop = cover_crop(1, 1000, 1000, 1);
        assert!(crop.height >= 1);
        assert!(crop.top < 1000);
    }

    #[test]
    fn test_contain() {
        assert_eq!(contain_size(400, 200, 100, 100), (100, 50));
        assert_eq!(contain_size(200, 400, 100, 100), (50, 100));
        assert_eq!(contain_size(300, 100, 200, 100), (200, 66));
        assert_eq!(contain_size(100, 100, 50, 50), (50, 50));
        assert_eq!(contain_size(10_000, 1, 100, 100), (100, 1));
    }
}
