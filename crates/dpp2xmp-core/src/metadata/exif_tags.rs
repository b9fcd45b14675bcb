//! Native EXIF reader for TIFF-based raw files (CR2 and friends).
//!
//! Covers only the standard EXIF block. DPP recipe data (CanonVRD) lives in
//! a vendor trailer that this reader does not parse, so the result carries
//! no crop or adjustment tags.

use std::io::{BufReader, Cursor};

use exif::{Field, In, Reader, Tag, Value};

use super::types::{MetadataError, TagMap, TagValue};

/// EXIF tags read from the primary image, with their exiftool names.
const EXIF_TAGS: &[(Tag, &str)] = &[
    (Tag::Make, "Make"),
    (Tag::Model, "Model"),
    (Tag::Orientation, "Orientation"),
    (Tag::ImageWidth, "ImageWidth"),
    (Tag::ImageLength, "ImageHeight"),
    (Tag::DateTime, "ModifyDate"),
    (Tag::Artist, "Artist"),
    (Tag::Copyright, "Copyright"),
    (Tag::ExposureTime, "ExposureTime"),
    (Tag::FNumber, "FNumber"),
    (Tag::ExposureProgram, "ExposureProgram"),
    (Tag::PhotographicSensitivity, "ISO"),
    (Tag::DateTimeOriginal, "DateTimeOriginal"),
    (Tag::DateTimeDigitized, "CreateDate"),
    (Tag::ExposureBiasValue, "ExposureCompensation"),
    (Tag::MeteringMode, "MeteringMode"),
    (Tag::Flash, "Flash"),
    (Tag::FocalLength, "FocalLength"),
    (Tag::PixelXDimension, "ExifImageWidth"),
    (Tag::PixelYDimension, "ExifImageHeight"),
    (Tag::WhiteBalance, "WhiteBalance"),
    (Tag::LensModel, "LensModel"),
];

/// Read EXIF tags from raw file bytes.
///
/// Values are numeric the way `exiftool -n` reports them; keys carry the
/// `EXIF:` group prefix.
pub fn read_exif_tags(bytes: &[u8]) -> Result<TagMap, MetadataError> {
    let mut reader = BufReader::new(Cursor::new(bytes));
    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| MetadataError::Exif(format!("Failed to read EXIF: {}", e)))?;

    let mut tags = TagMap::new();
    for &(tag, name) in EXIF_TAGS {
        if let Some(value) = exif.get_field(tag, In::PRIMARY).and_then(field_value) {
            tags.insert(format!("EXIF:{}", name), value);
        }
    }
    Ok(tags)
}

fn field_value(field: &Field) -> Option<TagValue> {
    match &field.value {
        Value::Ascii(parts) => parts.first().map(|bytes| {
            let text = String::from_utf8_lossy(bytes);
            TagValue::Text(text.trim_end_matches('\0').trim().to_string())
        }),
        Value::Byte(_) | Value::Short(_) | Value::Long(_) => {
            field.value.get_uint(0).map(|n| TagValue::Integer(n as i64))
        }
        Value::SShort(v) => v.first().map(|&n| TagValue::Integer(n as i64)),
        Value::SLong(v) => v.first().map(|&n| TagValue::Integer(n as i64)),
        Value::Rational(v) => v.first().map(|r| TagValue::Float(r.to_f64())),
        Value::SRational(v) => v.first().map(|r| TagValue::Float(r.to_f64())),
        Value::Float(v) => v.first().map(|&f| TagValue::Float(f as f64)),
        Value::Double(v) => v.first().map(|&f| TagValue::Float(f)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ifd_entry(buf: &mut Vec<u8>, tag: u16, typ: u16, count: u32, value: u32) {
        buf.extend_from_slice(&tag.to_le_bytes());
        buf.extend_from_slice(&typ.to_le_bytes());
        buf.extend_from_slice(&count.to_le_bytes());
        buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Little-endian TIFF with ImageWidth, Make and Orientation in IFD0.
    fn minimal_tiff() -> Vec<u8> {
        let mut buf = vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
        buf.extend_from_slice(&3u16.to_le_bytes());
        ifd_entry(&mut buf, 0x0100, 4, 1, 5184); // ImageWidth, LONG
        ifd_entry(&mut buf, 0x010F, 2, 6, 50); // Make, ASCII at offset 50
        ifd_entry(&mut buf, 0x0112, 3, 1, 6); // Orientation, SHORT
        buf.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(buf.len(), 50);
        buf.extend_from_slice(b"Canon\0");
        buf
    }

    #[test]
    fn test_read_minimal_tiff() {
        let tags = read_exif_tags(&minimal_tiff()).unwrap();
        assert_eq!(tags["EXIF:Make"], TagValue::from("Canon"));
        assert_eq!(tags["EXIF:Orientation"], TagValue::Integer(6));
        assert_eq!(tags["EXIF:ImageWidth"], TagValue::Integer(5184));
        assert!(!tags.contains_key("EXIF:Model"));
    }

    #[test]
    fn test_invalid_data() {
        let result = read_exif_tags(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(MetadataError::Exif(_))));
    }

    #[test]
    fn test_empty_data() {
        assert!(read_exif_tags(&[]).is_err());
    }
}
