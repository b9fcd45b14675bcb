//! Remapping of DPP (CanonVRD) tags onto camera-raw settings.
//!
//! # Algorithm
//!
//! 1. Promote the active picture style's settings to plain `CanonVRD:` names
//! 2. Copy the first present vendor source of each standard field to `crs:`
//! 3. Translate the vendor white balance into the standard vocabulary
//! 4. Derive `crs:HasCrop` and, when set, the fractional crop edges

use log::{debug, warn};

use super::types::{MetadataError, Orientation, TagMap, TagValue};
use crate::transform::{compute_crop_bounds, CropSpec};

/// Picture style codes written by DPP.
pub const PICTURE_STYLES: &[(i64, &str)] = &[
    (0, "Standard"),
    (1, "Portrait"),
    (2, "Landscape"),
    (3, "Neutral"),
    (4, "Faithful"),
    (5, "Monochrome"),
    (7, "Custom"),
];

/// Standard fields and their vendor sources, highest priority first.
pub const FIELD_SOURCES: &[(&str, &[&str])] = &[
    ("CropAngle", &["CanonVRD:AngleAdj"]),
    ("CropWidth", &["CanonVRD:CropWidth"]),
    ("CropHeight", &["CanonVRD:CropHeight"]),
    ("HasCrop", &["CanonVRD:CropActive"]),
    ("Saturation", &["CanonVRD:RawSaturation"]),
    (
        "Sharpness",
        &[
            "CanonVRD:RawSharpness",
            "CanonVRD:SharpnessAdj",
            "MakerNotes:Sharpness",
        ],
    ),
    (
        "Temperature",
        &["CanonVRD:WBAdjColorTemp", "MakerNotes:ColorTemperature"],
    ),
    (
        "WhiteBalance",
        &[
            "CanonVRD:WhiteBalanceAdj",
            "EXIF:WhiteBalance",
            "MakerNotes:WhiteBalance",
        ],
    ),
    (
        "Contrast2012",
        &[
            "CanonVRD:ContrastAdj",
            "CanonVRD:RawContrast",
            "MakerNotes:Contrast",
        ],
    ),
    (
        "Exposure2012",
        &["CanonVRD:RawBrightnessAdj", "CanonVRD:BrightnessAdj"],
    ),
    ("Highlights2012", &["CanonVRD:RawHighlight"]),
    ("Shadows2012", &["CanonVRD:RawShadow"]),
    (
        "ImageHeight",
        &[
            "tiff:ImageHeight",
            "exif:PixelYDimension",
            "MakerNotes:CanonImageHeight",
            "EXIF:ExifImageHeight",
        ],
    ),
    (
        "ImageWidth",
        &[
            "tiff:ImageWidth",
            "exif:PixelXDimension",
            "MakerNotes:CanonImageWidth",
            "EXIF:ExifImageWidth",
        ],
    ),
];

const WHITE_BALANCE_CODES: &[(i64, &str)] = &[
    (0, "As Shot"),
    (1, "Daylight"),
    (2, "Cloudy"),
    (3, "Tungsten"),
    (4, "Fluorescent"),
    (5, "Flash"),
    (8, "Shade"),
    (9, "Custom"),
    (30, "Custom"),
    (31, "As Shot"),
];

const WHITE_BALANCE_NAMES: &[(&str, &str)] = &[
    ("Auto", "As Shot"),
    ("Daylight", "Daylight"),
    ("Cloudy", "Cloudy"),
    ("Tungsten", "Tungsten"),
    ("Fluorescent", "Fluorescent"),
    ("Flash", "Flash"),
    ("Shade", "Shade"),
    ("Kelvin", "Custom"),
    ("Manual (Click)", "Custom"),
    ("Shot Settings", "As Shot"),
];

const PICTURE_STYLE_TAG: &str = "CanonVRD:PictureStyle";
const WHITE_BALANCE_TAG: &str = "CanonVRD:WhiteBalanceAdj";
const CROP_ACTIVE_TAG: &str = "CanonVRD:CropActive";

/// Name of the picture style a tag value refers to, by code or by name.
pub fn picture_style_name(value: &TagValue) -> Option<&'static str> {
    if let Some(name) = value.as_text() {
        let name = name.trim();
        if let Some(&(_, style)) = PICTURE_STYLES
            .iter()
            .find(|(_, style)| style.eq_ignore_ascii_case(name))
        {
            return Some(style);
        }
    }
    let code = value.as_i64()?;
    PICTURE_STYLES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|&(_, style)| style)
}

/// Standard white balance for a DPP white balance code or name.
pub fn white_balance_name(value: &TagValue) -> Option<&'static str> {
    if let Some(code) = value.as_i64() {
        return WHITE_BALANCE_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|&(_, name)| name);
    }
    let text = value.as_text()?.trim();
    WHITE_BALANCE_NAMES
        .iter()
        .find(|(vendor, _)| vendor.eq_ignore_ascii_case(text))
        .map(|&(_, name)| name)
}

/// EXIF orientation, from `EXIF:Orientation` then `tiff:Orientation`.
pub fn image_orientation(tags: &TagMap) -> Orientation {
    tags.get("EXIF:Orientation")
        .or_else(|| tags.get("tiff:Orientation"))
        .map(Orientation::from_tag)
        .unwrap_or_default()
}

/// Remap vendor tags onto `crs:` settings and compute the crop edges.
///
/// The input tags are kept; `crs:` entries are added or replaced.
///
/// # Errors
///
/// - `InvalidValue` if `CanonVRD:CropActive` is not a boolean, or a crop
///   value is not a finite number
/// - `MissingField` if the crop is active but the image size is unknown
/// - `Crop` if the image size is zero
pub fn remap_metadata(mut tags: TagMap) -> Result<TagMap, MetadataError> {
    promote_picture_style(&mut tags);

    for (field, sources) in FIELD_SOURCES {
        match sources.iter().find_map(|s| tags.get(*s)) {
            Some(value) => {
                let value = value.clone();
                tags.insert(format!("crs:{}", field), value);
            }
            None => debug!("Not found: {} {:?}", field, sources),
        }
    }

    if let Some(value) = tags.get(WHITE_BALANCE_TAG) {
        let name = white_balance_name(value).unwrap_or_else(|| {
            warn!("Unknown white balance {}, using As Shot", value);
            "As Shot"
        });
        tags.insert("crs:WhiteBalance".to_string(), TagValue::from(name));
    }

    let has_crop = match tags.get(CROP_ACTIVE_TAG) {
        None => false,
        Some(value) => value.as_bool().ok_or_else(|| invalid(CROP_ACTIVE_TAG, value))?,
    };
    tags.insert("crs:HasCrop".to_string(), TagValue::Bool(has_crop));

    if has_crop {
        let spec = crop_spec(&tags)?;
        let crop = compute_crop_bounds(&spec)?;
        if crop.is_degenerate() {
            warn!("Crop collapsed to {:?}", crop);
        }
        debug!("Crop {:?}", crop);
        tags.insert("crs:CropTop".to_string(), TagValue::Float(crop.top));
        tags.insert("crs:CropLeft".to_string(), TagValue::Float(crop.left));
        tags.insert("crs:CropBottom".to_string(), TagValue::Float(crop.bottom));
        tags.insert("crs:CropRight".to_string(), TagValue::Float(crop.right));
    }

    Ok(tags)
}

/// Build the crop transform input from remapped tags.
pub fn crop_spec(tags: &TagMap) -> Result<CropSpec, MetadataError> {
    let image_height = dimension(tags, "crs:ImageHeight")?;
    let image_width = dimension(tags, "crs:ImageWidth")?;

    let top = number_or(tags, "CanonVRD:CropTop", 0.0)?;
    let left = number_or(tags, "CanonVRD:CropLeft", 0.0)?;
    let height = number_or(tags, "CanonVRD:CropHeight", image_height as f64)?;
    let width = number_or(tags, "CanonVRD:CropWidth", image_width as f64)?;
    let angle = number_or(tags, "CanonVRD:AngleAdj", 0.0)?;

    Ok(CropSpec::new(image_width, image_height)
        .with_box(top, left, height, width)
        .with_angle(angle)
        .with_orientation(image_orientation(tags)))
}

fn promote_picture_style(tags: &mut TagMap) {
    let Some(style) = tags.get(PICTURE_STYLE_TAG).and_then(picture_style_name) else {
        return;
    };
    let prefix = format!("CanonVRD:{}", style);
    let promoted: Vec<(String, TagValue)> = tags
        .iter()
        .filter_map(|(key, value)| {
            let setting = key.strip_prefix(&prefix)?;
            (!setting.is_empty()).then(|| (format!("CanonVRD:{}", setting), value.clone()))
        })
        .collect();
    debug!("Picture style {}: {} settings", style, promoted.len());
    tags.extend(promoted);
}

fn dimension(tags: &TagMap, key: &str) -> Result<u32, MetadataError> {
    let value = tags
        .get(key)
        .ok_or_else(|| MetadataError::MissingField(key.to_string()))?;
    value
        .as_i64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| invalid(key, value))
}

fn number_or(tags: &TagMap, key: &str, default: f64) -> Result<f64, MetadataError> {
    match tags.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_f64()
            .filter(|f| f.is_finite())
            .ok_or_else(|| invalid(key, value)),
    }
}

fn invalid(field: &str, value: &TagValue) -> MetadataError {
    MetadataError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
