//! Camera-raw settings vocabulary.
//!
//! Every `crs:` attribute the sidecar may carry is listed here with its
//! value kind, accepted range and the default written when DPP recorded
//! nothing for it.

use log::warn;

use super::types::TagValue;

/// Value kind of a settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Text,
}

/// Default value of a settings field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl FieldDefault {
    pub fn to_tag(self) -> TagValue {
        match self {
            FieldDefault::Bool(b) => TagValue::Bool(b),
            FieldDefault::Int(i) => TagValue::Integer(i),
            FieldDefault::Float(f) => TagValue::Float(f),
            FieldDefault::Text(s) => TagValue::from(s),
        }
    }
}

/// Definition of one `crs:` settings field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Inclusive numeric range. Values outside it are logged, not rejected.
    pub range: Option<(f64, f64)>,
    /// Accepted text values; empty means unrestricted.
    pub values: &'static [&'static str],
    pub default: Option<FieldDefault>,
    /// Positive values are written with a leading `+`.
    pub plus: bool,
}

const fn flag(name: &'static str, default: bool) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Bool,
        range: None,
        values: &[],
        default: Some(FieldDefault::Bool(default)),
        plus: false,
    }
}

const fn int(name: &'static str, min: f64, max: f64, default: i64) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Int,
        range: Some((min, max)),
        values: &[],
        default: Some(FieldDefault::Int(default)),
        plus: false,
    }
}

/// Signed slider written with an explicit `+`, range -100..=100, default 0.
const fn slider(name: &'static str) -> FieldDef {
    FieldDef {
        plus: true,
        ..int(name, -100.0, 100.0, 0)
    }
}

const fn float(name: &'static str, range: Option<(f64, f64)>, default: f64) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Float,
        range,
        values: &[],
        default: Some(FieldDefault::Float(default)),
        plus: false,
    }
}

const fn text(name: &'static str, default: Option<&'static str>) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Text,
        range: None,
        values: &[],
        default: match default {
            Some(s) => Some(FieldDefault::Text(s)),
            None => None,
        },
        plus: false,
    }
}

/// Standard white balance vocabulary.
pub const WHITE_BALANCE_VALUES: &[&str] = &[
    "As Shot",
    "Daylight",
    "Cloudy",
    "Shade",
    "Tungsten",
    "Fluorescent",
    "Flash",
    "Custom",
];

const UNIT: Option<(f64, f64)> = Some((0.0, 1.0));

/// All known settings fields, sorted by name.
pub static CRS_FIELDS: &[FieldDef] = &[
    flag("AlreadyApplied", false),
    flag("AutoBrightness", false),
    flag("AutoContrast", false),
    flag("AutoExposure", false),
    int("AutoLateralCA", 0.0, 1.0, 0),
    flag("AutoShadows", false),
    slider("Blacks2012"),
    int("BlueHue", -100.0, 100.0, 0),
    int("BlueSaturation", -100.0, 100.0, 0),
    int("Brightness", 0.0, 150.0, 0),
    text("CameraProfile", Some("Adobe Standard")),
    text("CameraProfileDigest", Some("9C057227216BE688434471F22E5E736D")),
    int("ChromaticAberrationB", -100.0, 100.0, 0),
    int("ChromaticAberrationR", -100.0, 100.0, 0),
    slider("Clarity2012"),
    int("ColorNoiseReduction", 0.0, 100.0, 0),
    int("ColorNoiseReductionDetail", -100.0, 100.0, 50),
    slider("Contrast2012"),
    int("ConvertToGrayscale", -100.0, 100.0, 0),
    float("CropAngle", Some((-45.0, 45.0)), 0.0),
    float("CropBottom", UNIT, 1.0),
    int("CropConstrainToWarp", -100.0, 100.0, 0),
    float("CropHeight", None, 0.0),
    float("CropLeft", UNIT, 0.0),
    float("CropRight", UNIT, 1.0),
    float("CropTop", UNIT, 0.0),
    int("CropUnits", 0.0, 2.0, 0),
    float("CropWidth", None, 0.0),
    int("DefringeGreenAmount", -100.0, 100.0, 0),
    int("DefringeGreenHueHi", -100.0, 100.0, 60),
    int("DefringeGreenHueLo", -100.0, 100.0, 40),
    int("DefringePurpleAmount", -100.0, 100.0, 0),
    int("DefringePurpleHueHi", -100.0, 100.0, 30),
    int("DefringePurpleHueLo", -100.0, 100.0, 70),
    FieldDef {
        plus: true,
        ..float("Exposure2012", Some((-8.0, 5.0)), 0.0)
    },
    int("GrainAmount", -100.0, 100.0, 0),
    int("GreenHue", -100.0, 100.0, 0),
    int("GreenSaturation", -100.0, 100.0, 0),
    flag("HasCrop", false),
    flag("HasSettings", true),
    slider("Highlights2012"),
    int("HueAdjustmentAqua", -100.0, 100.0, 0),
    int("HueAdjustmentBlue", -100.0, 100.0, 0),
    int("HueAdjustmentGreen", -100.0, 100.0, 0),
    int("HueAdjustmentMagenta", -100.0, 100.0, 0),
    int("HueAdjustmentOrange", -100.0, 100.0, 0),
    int("HueAdjustmentPurple", -100.0, 100.0, 0),
    int("HueAdjustmentRed", -100.0, 100.0, 0),
    int("HueAdjustmentYellow", -100.0, 100.0, 0),
    int("LensManualDistortionAmount", -100.0, 100.0, 0),
    int("LensProfileChromaticAberrationScale", 0.0, 200.0, 0),
    int("LensProfileDistortionScale", 0.0, 200.0, 0),
    int("LensProfileEnable", 0.0, 1.0, 0),
    int("LensProfileVignettingScale", 0.0, 200.0, 0),
    int("LuminanceAdjustmentAqua", -100.0, 100.0, 0),
    int("LuminanceAdjustmentBlue", -100.0, 100.0, 0),
    int("LuminanceAdjustmentGreen", -100.0, 100.0, 0),
    int("LuminanceAdjustmentMagenta", -100.0, 100.0, 0),
    int("LuminanceAdjustmentOrange", -100.0, 100.0, 0),
    int("LuminanceAdjustmentPurple", -100.0, 100.0, 0),
    int("LuminanceAdjustmentRed", -100.0, 100.0, 0),
    int("LuminanceAdjustmentYellow", -100.0, 100.0, 0),
    int("LuminanceSmoothing", 0.0, 100.0, 0),
    slider("ParametricDarks"),
    int("ParametricHighlightSplit", -100.0, 100.0, 75),
    slider("ParametricHighlights"),
    slider("ParametricLights"),
    int("ParametricMidtoneSplit", -100.0, 100.0, 50),
    int("ParametricShadowSplit", -100.0, 100.0, 25),
    slider("ParametricShadows"),
    int("PerspectiveHorizontal", -100.0, 100.0, 0),
    int("PerspectiveRotate", -100.0, 100.0, 0),
    int("PerspectiveScale", -100.0, 200.0, 100),
    int("PerspectiveVertical", -100.0, 100.0, 0),
    int("PostCropVignetteAmount", -100.0, 100.0, 0),
    text("ProcessVersion", Some("6.7")),
    text("RawFileName", None),
    int("RedHue", -100.0, 100.0, 0),
    int("RedSaturation", -100.0, 100.0, 0),
    slider("Saturation"),
    int("SaturationAdjustmentAqua", -100.0, 100.0, 0),
    int("SaturationAdjustmentBlue", -100.0, 100.0, 0),
    int("SaturationAdjustmentGreen", -100.0, 100.0, 0),
    int("SaturationAdjustmentMagenta", -100.0, 100.0, 0),
    int("SaturationAdjustmentOrange", -100.0, 100.0, 0),
    int("SaturationAdjustmentPurple", -100.0, 100.0, 0),
    int("SaturationAdjustmentRed", -100.0, 100.0, 0),
    int("SaturationAdjustmentYellow", -100.0, 100.0, 0),
    int("ShadowTint", -100.0, 100.0, 0),
    slider("Shadows2012"),
    int("SharpenDetail", -100.0, 100.0, 0),
    int("SharpenEdgeMasking", -100.0, 100.0, 0),
    FieldDef {
        plus: true,
        ..float("SharpenRadius", Some((-100.0, 100.0)), 0.0)
    },
    int("Sharpness", -100.0, 100.0, 0),
    int("SplitToningBalance", -100.0, 100.0, 0),
    int("SplitToningHighlightHue", -100.0, 100.0, 0),
    int("SplitToningHighlightSaturation", -100.0, 100.0, 0),
    int("SplitToningShadowHue", -100.0, 100.0, 0),
    int("SplitToningShadowSaturation", -100.0, 100.0, 0),
    int("Temperature", 2000.0, 50000.0, 5200),
    FieldDef {
        plus: true,
        ..int("Tint", -150.0, 150.0, 0)
    },
    text("ToneCurveName2012", Some("Linear")),
    text("Version", Some("7.4")),
    slider("Vibrance"),
    int("VignetteAmount", -100.0, 100.0, 0),
    int("VignetteMidpoint", 0.0, 100.0, 0),
    FieldDef {
        values: WHITE_BALANCE_VALUES,
        ..text("WhiteBalance", Some("As Shot"))
    },
    slider("Whites2012"),
];

/// Look up a field by bare name (`Tint`) or namespaced name (`crs:Tint`).
pub fn field_definition(name: &str) -> Option<&'static FieldDef> {
    let bare = name.strip_prefix("crs:").unwrap_or(name);
    CRS_FIELDS.iter().find(|def| def.name == bare)
}

/// Render a tag value the way the sidecar stores it.
///
/// Names outside the settings table are written as the value's display
/// text.
pub fn format_field(name: &str, value: &TagValue) -> String {
    match field_definition(name) {
        Some(def) => def.format(value),
        None => value.to_string(),
    }
}

impl FieldDef {
    pub fn format(&self, value: &TagValue) -> String {
        match self.kind {
            FieldKind::Bool => match value.as_bool() {
                Some(true) => "True".to_string(),
                Some(false) => "False".to_string(),
                None => self.uncoerced(value),
            },
            FieldKind::Int => match value.as_i64() {
                Some(n) => self.signed(n as f64, n.to_string()),
                None => self.uncoerced(value),
            },
            FieldKind::Float => match value.as_f64().filter(|f| f.is_finite()) {
                Some(f) => self.signed(f, f.to_string()),
                None => self.uncoerced(value),
            },
            FieldKind::Text => {
                let text = value.to_string();
                if !self.values.is_empty() && !self.values.contains(&text.as_str()) {
                    warn!("crs:{} has unexpected value {:?}", self.name, text);
                }
                text
            }
        }
    }

    fn signed(&self, number: f64, text: String) -> String {
        if let Some((min, max)) = self.range {
            if number < min || number > max {
                warn!(
                    "crs:{} value {} is outside [{}, {}]",
                    self.name, text, min, max
                );
            }
        }
        if self.plus && number > 0.0 {
            format!("+{}", text)
        } else {
            text
        }
    }

    fn uncoerced(&self, value: &TagValue) -> String {
        warn!("crs:{} cannot interpret {:?} as {:?}", self.name, value, self.kind);
        value.to_string()
    }
}
