//! Split manifest files.
//!
//! A manifest lists one image per line. Entries may carry a directory prefix
//! (`ccpd_base/xxx.jpg`); only the file name is used to locate the image.

use std::fs;
use std::io;
use std::path::Path;

/// Read a manifest, trimming each line and dropping blank ones.
pub fn read_manifest(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_manifest(&text))
}

/// Parse manifest text into its entries.
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The file-name part of a manifest entry.
///
/// Returns `None` for entries that name a directory (`foo/..`, `/`).
pub fn entry_file_name(entry: &str) -> Option<&str> {
    Path::new(entry).file_name().and_then(|name| name.to_str())
}
