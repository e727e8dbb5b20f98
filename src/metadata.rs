//! SUMA metadata file scanning.
//!
//! A metadata request drops descriptor XML files under
//! `<metadata_dir>/installp/ppc/`. The only lines of interest are
//! `<SP name="YYYY-TT-SS-BBBB">`; the first one in each file names the SP
//! the file describes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::{glob_with, GlobError, MatchOptions, Pattern};
use regex::Regex;
use tracing::debug;

use crate::error::{Result, SumaError};

static SP_NAME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<SP name="([0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{4})">$"#).expect("valid regex")
});

/// Directory holding the descriptor files.
pub fn descriptor_dir(metadata_dir: &Path) -> PathBuf {
    metadata_dir.join("installp").join("ppc")
}

/// Files to scan for a working level.
///
/// A 10-character SP level (`YYYY-TT-SS`) has exactly one descriptor,
/// `<level>.xml`. Any other level scans every `*.xml`, sorted by name.
pub fn candidate_files(metadata_dir: &Path, level: &str) -> Result<Vec<PathBuf>> {
    let dir = descriptor_dir(metadata_dir);
    if level.len() == 10 {
        return Ok(vec![dir.join(format!("{}.xml", level))]);
    }

    // Shell glob semantics: hidden files never match `*`.
    let pattern = format!("{}/*.xml", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let paths = glob_with(&pattern, options).map_err(|e| {
        SumaError::metadata(format!("Bad metadata file pattern {}: {}", pattern, e))
    })?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.map_err(GlobError::into_error)?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    debug!("searching SP in files: {:?}", files);
    Ok(files)
}

/// First SP version named in a descriptor file.
///
/// Reading stops at the first matching line. A missing file names no SP.
pub fn find_sp_version(path: &Path) -> Result<Option<String>> {
    debug!("opening file: {}", path.display());
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no metadata file {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(SumaError::metadata(format!(
                "Cannot read metadata file {}: {}",
                path.display(),
                e
            )));
        }
    };

    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim_end();
        if let Some(caps) = SP_NAME_LINE.captures(line) {
            let version = caps[1].to_string();
            debug!("matched line: {}, version={}", line, version);
            return Ok(Some(version));
        }
    }
    Ok(None)
}

/// Highest SP version across files.
///
/// Versions compare as strings. All versions share the `YYYY-TT-SS-BBBB`
/// shape, so this orders by TL, then SP, then build.
pub fn latest_sp_version(files: &[PathBuf]) -> Result<Option<String>> {
    let mut latest: Option<String> = None;
    for file in files {
        if let Some(version) = find_sp_version(file)? {
            if latest.as_ref().is_none_or(|current| version > *current) {
                latest = Some(version);
            }
        }
    }
    Ok(latest)
}
