//! Plane geometry used to reason about angled crops.
//!
//! This module provides small value types for 2D work:
//! - [`Vector`]: a displacement with magnitude and direction
//! - [`Point`]: a position relative to the origin
//! - [`Rotation`]: a unit vector standing for a pure rotation
//! - [`Rectangle`]: a possibly rotated rectangle defined by its center
//!
//! # Coordinate System
//!
//! - Standard mathematical axes: x grows to the right, y grows upward
//! - Angles are measured counter-clockwise from the positive x axis
//! - Multiplying a vector by a rotation composes magnitudes multiplicatively
//!   and angles additively
//!
//! Image-space code (y grows downward) lives in [`crate::transform`].

mod rectangle;
mod vector;

pub use rectangle::Rectangle;
pub use vector::{Point, Rotation, Vector};

use thiserror::Error;

/// Tolerance used when checking that a rotation has unit magnitude.
pub const UNIT_TOLERANCE: f64 = 1e-4;

/// Error types for geometry constructors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A vector used as a rotation was not of unit length.
    #[error("Rotation must have magnitude 1, got {magnitude} at {degrees} degrees")]
    InvalidRotation { magnitude: f64, degrees: f64 },

    /// A constructor received a value it cannot represent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Round to a fixed number of decimal digits.
///
/// Works on the exact decimal expansion of `value`, so a product like
/// `value * 1e6` landing on a spurious `.5` cannot bump the last digit.
pub(crate) fn round_to(value: f64, digits: usize) -> f64 {
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}
