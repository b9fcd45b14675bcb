use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

/// Write XMP sidecars from the crop and adjustment recipe that Canon
/// Digital Photo Professional stores in RAW files.
#[derive(Debug, Parser)]
#[command(name = "dpp2xmp", about, version)]
pub struct Cli {
    /// RAW files to convert
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Accepted file extension, case-insensitive (repeatable)
    #[arg(long = "extension", value_name = "EXT", default_value = "cr2")]
    pub extensions: Vec<String>,

    /// exiftool executable used to extract tags
    #[arg(long, value_name = "PATH", env = "DPP2XMP_EXIFTOOL", default_value = "exiftool")]
    pub exiftool: PathBuf,

    /// Read tags from saved `exiftool -j -G -n` output instead of running exiftool
    #[arg(long, value_name = "PATH", conflicts_with = "native")]
    pub tags_json: Option<PathBuf>,

    /// Read standard EXIF tags with the built-in reader (no DPP recipe)
    #[arg(long)]
    pub native: bool,

    /// XMP template containing the ##FIELDS## placeholder
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Rewrite sidecars that are newer than their RAW file
    #[arg(long)]
    pub force: bool,

    /// Print sidecars to stdout instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level selected by `-v`; `RUST_LOG` still takes precedence.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dpp2xmp", "a.cr2"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.cr2")]);
        assert_eq!(cli.extensions, vec!["cr2".to_string()]);
        assert!(!cli.force);
        assert!(!cli.dry_run);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_repeated_extension_and_verbosity() {
        let cli = Cli::try_parse_from([
            "dpp2xmp",
            "--extension",
            "cr2",
            "--extension",
            "CR3",
            "-vv",
            "a.cr2",
        ])
        .unwrap();
        assert_eq!(cli.extensions, vec!["cr2".to_string(), "CR3".to_string()]);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["dpp2xmp"]).is_err());
    }

    #[test]
    fn test_native_conflicts_with_tags_json() {
        let result = Cli::try_parse_from(["dpp2xmp", "--native", "--tags-json", "t.json", "a.cr2"]);
        assert!(result.is_err());
    }
}
