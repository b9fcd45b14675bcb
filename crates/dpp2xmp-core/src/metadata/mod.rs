//! Tag metadata: value model, DPP remapping and camera-raw field formatting.
//!
//! Tags arrive as a flat map keyed by `Group:Name`, the way
//! `exiftool -j -G` reports them. [`remap_metadata`] adds the `crs:`
//! settings derived from the `CanonVRD:` recipe; [`format_field`] renders a
//! value for the sidecar.

mod exif_tags;
mod fields;
mod remap;
mod types;

pub use exif_tags::read_exif_tags;
pub use fields::{
    field_definition, format_field, FieldDef, FieldDefault, FieldKind, CRS_FIELDS,
    WHITE_BALANCE_VALUES,
};
pub use remap::{
    crop_spec, image_orientation, picture_style_name, remap_metadata, white_balance_name,
    FIELD_SOURCES, PICTURE_STYLES,
};
pub use types::{MetadataError, Orientation, TagMap, TagValue};
