//! Core types for tag metadata.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::CropError;

/// Error types for metadata remapping.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetadataError {
    /// A tag needed to compute the crop is absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A tag is present but its value cannot be interpreted.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The crop transform rejected the recorded geometry.
    #[error("Crop error: {0}")]
    Crop(#[from] CropError),

    /// EXIF parsing error.
    #[error("EXIF error: {0}")]
    Exif(String),
}

/// A single tag value as reported by the metadata extractor.
///
/// Deserializes from the scalars and arrays found in `exiftool -j` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<TagValue>),
}

/// Tags keyed by namespaced name, e.g. `CanonVRD:CropTop`.
pub type TagMap = BTreeMap<String, TagValue>;

impl TagValue {
    /// Numeric value. Numeric text is parsed; booleans count as 0 or 1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            TagValue::Integer(i) => Some(*i as f64),
            TagValue::Float(f) => Some(*f),
            TagValue::Text(s) => s.trim().parse().ok(),
            TagValue::List(_) => None,
        }
    }

    /// Integer value. Fractions are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Integer(i) => Some(*i),
            TagValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    self.as_f64()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                }),
            _ => self
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64),
        }
    }

    /// Boolean value from `true`/`false`, 0/1, or Yes/No, True/False,
    /// On/Off text (case-insensitive).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TagValue::Bool(b) => Some(*b),
            TagValue::Integer(0) => Some(false),
            TagValue::Integer(1) => Some(true),
            TagValue::Float(f) if *f == 0.0 => Some(false),
            TagValue::Float(f) if *f == 1.0 => Some(true),
            TagValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "on" | "1" => Some(true),
                "no" | "false" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Bool(true) => f.write_str("True"),
            TagValue::Bool(false) => f.write_str("False"),
            TagValue::Integer(i) => write!(f, "{}", i),
            TagValue::Float(x) => write!(f, "{}", x),
            TagValue::Text(s) => f.write_str(s),
            TagValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Integer(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        TagValue::Integer(value as i64)
    }
}

impl From<u32> for TagValue {
    fn from(value: u32) -> Self {
        TagValue::Integer(value as i64)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Float(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Text(value)
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    const ALL: [Orientation; 8] = [
        Orientation::Normal,
        Orientation::FlipHorizontal,
        Orientation::Rotate180,
        Orientation::FlipVertical,
        Orientation::Transpose,
        Orientation::Rotate90CW,
        Orientation::Transverse,
        Orientation::Rotate270CW,
    ];

    /// The description exiftool prints for this orientation.
    pub fn description(self) -> &'static str {
        match self {
            Orientation::Normal => "Horizontal (normal)",
            Orientation::FlipHorizontal => "Mirror horizontal",
            Orientation::Rotate180 => "Rotate 180",
            Orientation::FlipVertical => "Mirror vertical",
            Orientation::Transpose => "Mirror horizontal and rotate 270 CW",
            Orientation::Rotate90CW => "Rotate 90 CW",
            Orientation::Transverse => "Mirror horizontal and rotate 90 CW",
            Orientation::Rotate270CW => "Rotate 270 CW",
        }
    }

    /// Parse an exiftool description such as "Rotate 90 CW".
    pub fn from_description(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.description().eq_ignore_ascii_case(text))
    }

    /// Interpret a tag value, numeric or descriptive. Unknown values give
    /// `Normal`.
    pub fn from_tag(value: &TagValue) -> Self {
        if let Some(o) = value.as_text().and_then(Self::from_description) {
            return o;
        }
        value
            .as_i64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Orientation::from)
            .unwrap_or_default()
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
