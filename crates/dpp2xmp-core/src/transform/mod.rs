//! Crop coordinate transforms.
//!
//! This module converts crops recorded by Digital Photo Professional (pixel
//! box plus straightening angle) into the fractional crop edges written to
//! camera-raw XMP settings. No pixel data is touched.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the image, y grows downward
//! - Input crop boxes are in pixels: top-left corner plus extents
//! - Output edges are normalized (0.0 to 1.0) relative to image dimensions
//! - The recorded angle has the opposite sign of the one shown in the
//!   editor UI

mod crop;

pub use crop::{compute_crop_bounds, CropError, CropResult, CropSpec};
