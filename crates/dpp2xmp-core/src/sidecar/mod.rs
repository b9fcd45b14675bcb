//! XMP sidecar assembly.
//!
//! Remapped tags become `namespace:Name="value"` attributes on the single
//! `rdf:Description` element of an XMP packet. Only tags in the namespaces
//! the template declares are written; every camera-raw setting missing from
//! the tags is filled in with its default.

use std::borrow::Cow;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::metadata::{format_field, remap_metadata, MetadataError, TagMap, CRS_FIELDS};

/// Marker in the template that is replaced by the attribute lines.
pub const FIELDS_PLACEHOLDER: &str = "##FIELDS##";

/// XMP packet declaring every namespace in [`NAMESPACES`].
pub const DEFAULT_TEMPLATE: &str = include_str!("template.xmp");

/// Namespace prefixes written to the sidecar, in their canonical spelling.
pub const NAMESPACES: &[&str] = &[
    "xmp",
    "tiff",
    "exif",
    "dc",
    "aux",
    "photoshop",
    "xmpMM",
    "stEvt",
    "crs",
];

/// Separator between attribute lines, matching the template's indentation.
const FIELD_SEPARATOR: &str = "\r\n   ";

/// Errors that can occur while building a sidecar.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SidecarError {
    #[error("Template does not contain the {0} placeholder")]
    MissingPlaceholder(String),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Select and format the tags that belong in the sidecar.
///
/// Returns `(name, value)` pairs sorted by name. Group prefixes are matched
/// case-insensitively and rewritten to the canonical spelling, so
/// `XMP:Rating` becomes `xmp:Rating`.
pub fn metadata_to_fields(tags: &TagMap) -> Vec<(String, String)> {
    let mut fields = BTreeMap::new();

    for (key, value) in tags {
        let Some((group, name)) = key.split_once(':') else {
            continue;
        };
        if name.is_empty() || name.contains(':') {
            continue;
        }
        let Some(namespace) = NAMESPACES.iter().find(|ns| ns.eq_ignore_ascii_case(group)) else {
            continue;
        };
        let key = format!("{}:{}", namespace, name);
        let value = format_field(&key, value);
        fields.insert(key, value);
    }

    for def in CRS_FIELDS {
        let Some(default) = def.default else {
            continue;
        };
        fields
            .entry(format!("crs:{}", def.name))
            .or_insert_with(|| def.format(&default.to_tag()));
    }

    fields.into_iter().collect()
}

/// Join fields into `name="value"` attribute lines.
pub fn render_fields(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, escape_attribute(value)))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Substitute rendered fields into a template.
pub fn render_sidecar(template: &str, fields: &[(String, String)]) -> Result<String, SidecarError> {
    validate_template(template)?;
    Ok(template.replace(FIELDS_PLACEHOLDER, &render_fields(fields)))
}

/// Check that a template can receive fields.
pub fn validate_template(template: &str) -> Result<(), SidecarError> {
    if template.contains(FIELDS_PLACEHOLDER) {
        Ok(())
    } else {
        Err(SidecarError::MissingPlaceholder(FIELDS_PLACEHOLDER.to_string()))
    }
}

/// Remap extracted tags and render the complete sidecar document.
pub fn tags_to_sidecar(tags: TagMap, template: &str) -> Result<String, SidecarError> {
    validate_template(template)?;
    let tags = remap_metadata(tags)?;
    render_sidecar(template, &metadata_to_fields(&tags))
}

fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TagValue;

    fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_namespace_filter_and_canonical_case() {
        let mut tags = TagMap::new();
        tags.insert("XMP:Rating".to_string(), TagValue::from(3));
        tags.insert("XMPMM:DocumentID".to_string(), TagValue::from("abc"));
        tags.insert("CanonVRD:CropTop".to_string(), TagValue::from(10));
        tags.insert("EXIF:Make".to_string(), TagValue::from("Canon"));
        tags.insert("SourceFile".to_string(), TagValue::from("a.cr2"));

        let fields = metadata_to_fields(&tags);
        assert_eq!(field(&fields, "xmp:Rating"), Some("3"));
        assert_eq!(field(&fields, "xmpMM:DocumentID"), Some("abc"));
        assert_eq!(field(&fields, "exif:Make"), Some("Canon"));
        assert!(fields.iter().all(|(n, _)| !n.starts_with("CanonVRD")));
        assert!(fields.iter().all(|(n, _)| n != "SourceFile"));
    }

    #[test]
    fn test_defaults_added() {
        let fields = metadata_to_fields(&TagMap::new());
        assert_eq!(field(&fields, "crs:Temperature"), Some("5200"));
        assert_eq!(field(&fields, "crs:HasSettings"), Some("True"));
        assert_eq!(field(&fields, "crs:CropBottom"), Some("1"));
        assert_eq!(field(&fields, "crs:WhiteBalance"), Some("As Shot"));
        assert_eq!(field(&fields, "crs:Version"), Some("7.4"));
        // No default, so never invented.
        assert_eq!(field(&fields, "crs:RawFileName"), None);
    }

    #[test]
    fn test_present_values_override_defaults() {
        let mut tags = TagMap::new();
        tags.insert("crs:Temperature".to_string(), TagValue::from(4300));
        tags.insert("crs:Tint".to_string(), TagValue::from(7));
        let fields = metadata_to_fields(&tags);
        assert_eq!(field(&fields, "crs:Temperature"), Some("4300"));
        assert_eq!(field(&fields, "crs:Tint"), Some("+7"));
    }

    #[test]
    fn test_fields_sorted() {
        let mut tags = TagMap::new();
        tags.insert("tiff:Model".to_string(), TagValue::from("EOS 5D"));
        tags.insert("aux:Lens".to_string(), TagValue::from("24-70"));
        let fields = metadata_to_fields(&tags);
        assert!(fields.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_render_fields() {
        let fields = vec![
            ("crs:HasCrop".to_string(), "True".to_string()),
            ("tiff:Model".to_string(), "Canon \"EOS\" <5D> & co".to_string()),
        ];
        assert_eq!(
            render_fields(&fields),
            "crs:HasCrop=\"True\"\r\n   tiff:Model=\"Canon &quot;EOS&quot; &lt;5D&gt; &amp; co\""
        );
    }

    #[test]
    fn test_render_sidecar() {
        let fields = vec![("crs:HasCrop".to_string(), "False".to_string())];
        let out = render_sidecar("<a ##FIELDS##/>", &fields).unwrap();
        assert_eq!(out, "<a crs:HasCrop=\"False\"/>");
    }

    #[test]
    fn test_missing_placeholder() {
        let err = render_sidecar("<a/>", &[]).unwrap_err();
        assert_eq!(err, SidecarError::MissingPlaceholder("##FIELDS##".to_string()));
    }

    #[test]
    fn test_default_template_declares_namespaces() {
        assert!(DEFAULT_TEMPLATE.contains(FIELDS_PLACEHOLDER));
        for ns in NAMESPACES {
            assert!(
                DEFAULT_TEMPLATE.contains(&format!("xmlns:{}=", ns)),
                "missing {}",
                ns
            );
        }
    }

    #[test]
    fn test_tags_to_sidecar() {
        let mut tags = TagMap::new();
        tags.insert("CanonVRD:CropActive".to_string(), TagValue::from(true));
        tags.insert("tiff:ImageWidth".to_string(), TagValue::from(100));
        tags.insert("tiff:ImageHeight".to_string(), TagValue::from(100));
        tags.insert("CanonVRD:CropTop".to_string(), TagValue::from(10));
        tags.insert("CanonVRD:CropLeft".to_string(), TagValue::from(10));
        tags.insert("CanonVRD:CropWidth".to_string(), TagValue::from(80));
        tags.insert("CanonVRD:CropHeight".to_string(), TagValue::from(80));

        let xmp = tags_to_sidecar(tags, DEFAULT_TEMPLATE).unwrap();
        assert!(xmp.contains("crs:HasCrop=\"True\""));
        assert!(xmp.contains("crs:CropTop=\"0.1\""));
        assert!(xmp.contains("crs:CropRight=\"0.9\""));
        assert!(xmp.contains("crs:CropWidth=\"80\""));
        assert!(!xmp.contains(FIELDS_PLACEHOLDER));
    }

    #[test]
    fn test_tags_to_sidecar_propagates_metadata_error() {
        let mut tags = TagMap::new();
        tags.insert("CanonVRD:CropActive".to_string(), TagValue::from(true));
        let err = tags_to_sidecar(tags, DEFAULT_TEMPLATE).unwrap_err();
        assert!(matches!(
            err,
            SidecarError::Metadata(MetadataError::MissingField(_))
        ));
    }
}
