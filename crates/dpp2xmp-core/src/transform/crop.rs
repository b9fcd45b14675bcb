//! Angled crop to fractional crop edges.
//!
//! The crop box is rotated about its own center. Its upper-left and
//! lower-right corners are moved to their rotated positions, converted to
//! fractions of the image size, then pushed back inside the frame.
//!
//! # Algorithm
//!
//! For each of the two corners, with `(x, y)` its offset from the box center:
//! ```text
//! x' = x * cos(θ) - y * sin(θ)
//! y' = x * sin(θ) + y * cos(θ)
//! corner_px = anchor_px + (offset' - offset)
//! ```
//!
//! # Clamping
//!
//! Applied in this order, each step shifting the opposite edge by the same
//! overflow to keep the box size:
//! 1. top below 0
//! 2. left below 0
//! 3. bottom above 1 (top floored at 0)
//! 4. right above 1 (left floored at 0)
//! 5. swap inverted top/bottom, then inverted left/right
//!
//! Results are rounded to 6 decimal digits. A box that still collapses to
//! zero width or height is returned as is.
//!
//! # Example
//!
//! ```
//! use dpp2xmp_core::transform::{compute_crop_bounds, CropSpec};
//!
//! let spec = CropSpec::new(100, 100).with_box(10.0, 10.0, 80.0, 80.0);
//! let crop = compute_crop_bounds(&spec).unwrap();
//! assert_eq!((crop.top, crop.left, crop.bottom, crop.right), (0.1, 0.1, 0.9, 0.9));
//! ```

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{round_to, Rotation, Vector};
use crate::metadata::Orientation;

/// Number of decimal digits kept in crop edges.
pub const CROP_PRECISION: usize = 6;

/// Errors that can occur while computing crop edges.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CropError {
    /// Image width or height is zero
    #[error("Cannot normalize crop: image dimensions are {width}x{height}")]
    DivisionByZero { width: u32, height: u32 },

    /// A box coordinate or the angle is NaN or infinite
    #[error("Crop {0} is not a finite number")]
    NonFinite(&'static str),
}

/// A crop as recorded by the vendor tool.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropSpec {
    /// Image height in pixels.
    pub image_height: u32,
    /// Image width in pixels.
    pub image_width: u32,
    /// EXIF orientation. Carried along, not used by the transform.
    pub orientation: Orientation,
    /// Top edge of the unrotated crop box in pixels.
    pub top: f64,
    /// Left edge of the unrotated crop box in pixels.
    pub left: f64,
    /// Crop box height in pixels.
    pub height: f64,
    /// Crop box width in pixels.
    pub width: f64,
    /// Straightening angle in degrees (opposite sign from the editor UI).
    pub angle: f64,
}

impl CropSpec {
    /// A full-frame, unrotated crop of a `width` x `height` image.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_height,
            image_width,
            orientation: Orientation::Normal,
            top: 0.0,
            left: 0.0,
            height: image_height as f64,
            width: image_width as f64,
            angle: 0.0,
        }
    }

    /// Set the crop box (top, left, height, width) in pixels.
    pub fn with_box(mut self, top: f64, left: f64, height: f64, width: f64) -> Self {
        self.top = top;
        self.left = left;
        self.height = height;
        self.width = width;
        self
    }

    /// Set the straightening angle in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Fractional crop edges, each relative to the image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropResult {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl CropResult {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the crop has collapsed to a line or a point.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    fn rounded(self) -> Self {
        Self {
            top: round_to(self.top, CROP_PRECISION),
            left: round_to(self.left, CROP_PRECISION),
            bottom: round_to(self.bottom, CROP_PRECISION),
            right: round_to(self.right, CROP_PRECISION),
        }
    }
}

/// Compute the fractional crop edges for an angled pixel crop.
///
/// # Errors
///
/// `CropError::DivisionByZero` if either image dimension is zero, and
/// `CropError::NonFinite` if a box coordinate or the angle is NaN or infinite.
pub fn compute_crop_bounds(spec: &CropSpec) -> Result<CropResult, CropError> {
    let unclamped = rotated_edges(spec)?;
    let result = clamp_to_frame(unclamped).rounded();
    trace!("crop {:?} -> unclamped {:?} -> {:?}", spec, unclamped, result);
    Ok(result)
}

/// Rotate the box corners and normalize them, without clamping.
fn rotated_edges(spec: &CropSpec) -> Result<CropResult, CropError> {
    if spec.image_width == 0 || spec.image_height == 0 {
        return Err(CropError::DivisionByZero {
            width: spec.image_width,
            height: spec.image_height,
        });
    }

    let inputs = [
        ("top", spec.top),
        ("left", spec.left),
        ("height", spec.height),
        ("width", spec.width),
        ("angle", spec.angle),
    ];
    if let Some((name, _)) = inputs.iter().find(|(_, value)| !value.is_finite()) {
        return Err(CropError::NonFinite(*name));
    }

    let rotation = Rotation::from_radians(spec.angle.to_radians());

    // Corner offsets from the box center, y downward
    let upper_left = Vector::new(-spec.width / 2.0, -spec.height / 2.0);
    let lower_right = Vector::new(spec.width / 2.0, spec.height / 2.0);

    let upper_left_shift = upper_left.rotate(rotation) - upper_left;
    let lower_right_shift = lower_right.rotate(rotation) - lower_right;

    let left_px = spec.left + upper_left_shift.x;
    let top_px = spec.top + upper_left_shift.y;
    let right_px = spec.left + spec.width + lower_right_shift.x;
    let bottom_px = spec.top + spec.height + lower_right_shift.y;

    let image_width = spec.image_width as f64;
    let image_height = spec.image_height as f64;

    Ok(CropResult {
        top: top_px / image_height,
        left: left_px / image_width,
        bottom: bottom_px / image_height,
        right: right_px / image_width,
    })
}

/// Push edges back into [0, 1]. The order of the steps matters for crops
/// that overflow on two sides.
fn clamp_to_frame(crop: CropResult) -> CropResult {
    let CropResult {
        mut top,
        mut left,
        mut bottom,
        mut right,
    } = crop;

    if top < 0.0 {
        bottom -= top;
        top = 0.0;
    }
    if left < 0.0 {
        right -= left;
        left = 0.0;
    }
    if bottom > 1.0 {
        top -= bottom - 1.0;
        if top < 0.0 {
            top = 0.0;
        }
        bottom = 1.0;
    }
    if right > 1.0 {
        left -= right - 1.0;
        if left < 0.0 {
            left = 0.0;
        }
        right = 1.0;
    }
    if top > bottom {
        std::mem::swap(&mut top, &mut bottom);
    }
    if left > right {
        std::mem::swap(&mut left, &mut right);
    }

    CropResult {
        top,
        left,
        bottom,
        right,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
