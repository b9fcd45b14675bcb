//! Batch conversion of RAW files to sidecars.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info, warn};

use dpp2xmp_core::sidecar::validate_template;
use dpp2xmp_core::{tags_to_sidecar, TagMap, TagValue, DEFAULT_TEMPLATE};

use crate::cli::Cli;
use crate::extract::{ExifTool, JsonTags, NativeExif, TagSource};

/// Per-run file counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Convert every stale file named on the command line.
///
/// Only template problems abort the run; per-file failures are logged and
/// counted.
pub fn run(cli: &Cli) -> Result<Summary> {
    let template = load_template(cli.template.as_deref())?;
    let mut summary = Summary::default();

    let mut stale = Vec::new();
    for path in &cli.files {
        if !has_extension(path, &cli.extensions) {
            warn!("Skipping {}: extension is not one of {:?}", path.display(), cli.extensions);
            continue;
        }
        if !cli.force {
            match is_up_to_date(path, &sidecar_path(path)) {
                Ok(true) => {
                    info!("Skipping {}: sidecar is up to date", path.display());
                    summary.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    error!("{}: {}", path.display(), e);
                    summary.failed += 1;
                    continue;
                }
            }
        }
        stale.push(path.clone());
    }

    if !stale.is_empty() {
        match tag_source(cli).extract(&stale) {
            Ok(results) => {
                for (path, tags) in stale.iter().zip(results) {
                    match tags.and_then(|tags| convert_file(path, tags, &template, cli.dry_run)) {
                        Ok(()) => summary.written += 1,
                        Err(e) => {
                            error!("{}: {:#}", path.display(), e);
                            summary.failed += 1;
                        }
                    }
                }
            }
            Err(e) => {
                error!("Tag extraction failed: {:#}", e);
                summary.failed += stale.len();
            }
        }
    }

    info!(
        "{} written, {} skipped, {} failed",
        summary.written, summary.skipped, summary.failed
    );
    Ok(summary)
}

fn tag_source(cli: &Cli) -> Box<dyn TagSource> {
    if let Some(path) = &cli.tags_json {
        Box::new(JsonTags::new(path))
    } else if cli.native {
        Box::new(NativeExif)
    } else {
        Box::new(ExifTool::new(&cli.exiftool))
    }
}

/// Read a template file, or use the built-in one.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    let template = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    validate_template(&template).context("Unusable template")?;
    Ok(template)
}

fn convert_file(path: &Path, mut tags: TagMap, template: &str, dry_run: bool) -> Result<()> {
    if let Some(name) = path.file_name() {
        tags.entry("crs:RawFileName".to_string())
            .or_insert_with(|| TagValue::from(name.to_string_lossy().into_owned()));
    }
    let xmp = tags_to_sidecar(tags, template)?;

    let sidecar = sidecar_path(path);
    if dry_run {
        info!("Would write {}", sidecar.display());
        println!("{}", xmp);
    } else {
        fs::write(&sidecar, xmp)
            .with_context(|| format!("Failed to write {}", sidecar.display()))?;
        info!("Wrote {}", sidecar.display());
    }
    Ok(())
}

/// Sidecar location: the RAW path with its extension replaced by `xmp`.
pub fn sidecar_path(raw: &Path) -> PathBuf {
    raw.with_extension("xmp")
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// True when the sidecar exists and is at least as new as the RAW file.
pub fn is_up_to_date(raw: &Path, sidecar: &Path) -> io::Result<bool> {
    let raw_modified = fs::metadata(raw)?.modified()?;
    match fs::metadata(sidecar) {
        Ok(meta) => Ok(meta.modified()? >= raw_modified),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("/photos/IMG_0001.CR2")),
            PathBuf::from("/photos/IMG_0001.xmp")
        );
        assert_eq!(sidecar_path(Path::new("a.b.cr2")), PathBuf::from("a.b.xmp"));
    }

    #[test]
    fn test_has_extension() {
        let exts = vec!["cr2".to_string(), ".crw".to_string()];
        assert!(has_extension(Path::new("IMG_1.CR2"), &exts));
        assert!(has_extension(Path::new("IMG_1.cr2"), &exts));
        assert!(has_extension(Path::new("IMG_1.CRW"), &exts));
        assert!(!has_extension(Path::new("IMG_1.jpg"), &exts));
        assert!(!has_extension(Path::new("cr2"), &exts));
    }

    #[test]
    fn test_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("IMG_1.CR2");
        let xmp = dir.path().join("IMG_1.xmp");
        fs::write(&raw, b"raw").unwrap();
        assert!(!is_up_to_date(&raw, &xmp).unwrap());

        fs::write(&xmp, b"xmp").unwrap();
        let now = SystemTime::now();
        File::options().write(true).open(&raw).unwrap().set_modified(now).unwrap();
        File::options().write(true).open(&xmp).unwrap().set_modified(now).unwrap();
        assert!(is_up_to_date(&raw, &xmp).unwrap());

        File::options()
            .write(true)
            .open(&raw)
            .unwrap()
            .set_modified(now + Duration::from_secs(60))
            .unwrap();
        assert!(!is_up_to_date(&raw, &xmp).unwrap());
    }

    #[test]
    fn test_up_to_date_missing_raw() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("missing.CR2");
        assert!(is_up_to_date(&raw, &sidecar_path(&raw)).is_err());
    }

    #[test]
    fn test_load_template() {
        assert_eq!(load_template(None).unwrap(), DEFAULT_TEMPLATE);

        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.xmp");
        fs::write(&good, "<x ##FIELDS##/>").unwrap();
        assert_eq!(load_template(Some(&good)).unwrap(), "<x ##FIELDS##/>");

        let bad = dir.path().join("bad.xmp");
        fs::write(&bad, "<x/>").unwrap();
        assert!(load_template(Some(&bad)).is_err());
        assert!(load_template(Some(&dir.path().join("missing.xmp"))).is_err());
    }

    #[test]
    fn test_convert_file_sets_raw_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("IMG_7.CR2");
        convert_file(&raw, TagMap::new(), DEFAULT_TEMPLATE, false).unwrap();

        let xmp = fs::read_to_string(dir.path().join("IMG_7.xmp")).unwrap();
        assert!(xmp.contains("crs:RawFileName=\"IMG_7.CR2\""));
        assert!(xmp.contains("crs:HasCrop=\"False\""));
    }
}
