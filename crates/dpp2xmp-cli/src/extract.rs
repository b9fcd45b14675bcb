//! Tag extraction backends.
//!
//! All backends take the whole batch of files at once so that exiftool is
//! started a single time per run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, warn};

use dpp2xmp_core::{read_exif_tags, TagMap, TagValue};

/// Key exiftool uses for the path of the file a record belongs to.
const SOURCE_FILE: &str = "SourceFile";

/// A source of tag maps for RAW files.
pub trait TagSource {
    /// Extract tags for every path, returned in the same order.
    ///
    /// The outer error fails the whole batch; inner errors fail one file.
    fn extract(&self, paths: &[PathBuf]) -> Result<Vec<Result<TagMap>>>;
}

/// Runs `exiftool -j -G -n` over the batch.
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TagSource for ExifTool {
    fn extract(&self, paths: &[PathBuf]) -> Result<Vec<Result<TagMap>>> {
        debug!("Running {} on {} files", self.program.display(), paths.len());
        let output = Command::new(&self.program)
            .args(["-j", "-G", "-n"])
            .args(paths)
            .output()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        // exiftool exits non-zero when any file fails but still reports the rest
        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            bail!(
                "{} produced no output ({}): {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        if !output.status.success() {
            warn!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let records: Vec<TagMap> =
            serde_json::from_slice(&output.stdout).context("Failed to parse exiftool output")?;
        Ok(match_records(records, paths))
    }
}

/// Reads previously saved exiftool JSON output.
pub struct JsonTags {
    path: PathBuf,
}

impl JsonTags {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TagSource for JsonTags {
    fn extract(&self, paths: &[PathBuf]) -> Result<Vec<Result<TagMap>>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let records: Vec<TagMap> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(match_records(records, paths))
    }
}

/// Reads the standard EXIF block directly from each file.
pub struct NativeExif;

impl TagSource for NativeExif {
    fn extract(&self, paths: &[PathBuf]) -> Result<Vec<Result<TagMap>>> {
        Ok(paths
            .iter()
            .map(|path| {
                let bytes =
                    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
                read_exif_tags(&bytes)
                    .with_context(|| format!("Failed to read EXIF from {}", path.display()))
            })
            .collect())
    }
}

/// Pair records with paths by `SourceFile`, falling back to the file name.
fn match_records(records: Vec<TagMap>, paths: &[PathBuf]) -> Vec<Result<TagMap>> {
    let mut by_source: HashMap<String, TagMap> = HashMap::new();
    for record in records {
        match record.get(SOURCE_FILE).and_then(TagValue::as_text) {
            Some(source) => {
                let source = source.to_string();
                by_source.insert(source, record);
            }
            None => warn!("Ignoring tag record without {}", SOURCE_FILE),
        }
    }

    paths
        .iter()
        .map(|path| {
            if let Some(record) = by_source.remove(&*path.to_string_lossy()) {
                return Ok(record);
            }
            let file_name = path.file_name();
            let source = by_source
                .keys()
                .find(|source| file_name.is_some() && Path::new(source).file_name() == file_name)
                .cloned();
            source
                .and_then(|source| by_source.remove(&source))
                .ok_or_else(|| anyhow!("No tags extracted for {}", path.display()))
        })
        .collect()
}
