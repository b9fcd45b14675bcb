//! dpp2xmp Core - DPP recipe to XMP sidecar conversion
//!
//! This crate turns the adjustment recipe that Canon Digital Photo
//! Professional stores in a RAW file (the CanonVRD block, as reported by
//! exiftool) into an XMP sidecar with camera-raw settings, including the
//! conversion of angled crops into fractional crop edges.

pub mod geometry;
pub mod metadata;
pub mod sidecar;
pub mod transform;

pub use geometry::{GeometryError, Point, Rectangle, Rotation, Vector};
pub use metadata::{
    format_field, read_exif_tags, remap_metadata, MetadataError, Orientation, TagMap, TagValue,
};
pub use sidecar::{
    metadata_to_fields, render_fields, render_sidecar, tags_to_sidecar, SidecarError,
    DEFAULT_TEMPLATE,
};
pub use transform::{compute_crop_bounds, CropError, CropResult, CropSpec};
