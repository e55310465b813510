//! Split organization reports.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::Split;
use crate::summary::write_capped_list;

/// Outcome of organizing every split.
#[derive(Clone, Debug, Serialize)]
pub struct OrganizeReport {
    /// Root of the organized dataset.
    pub output: PathBuf,
    pub splits: Vec<SplitReport>,
}

impl OrganizeReport {
    pub fn new(output: PathBuf) -> Self {
        Self {
            output,
            splits: Vec::new(),
        }
    }

    /// Report for one split, if it was processed.
    pub fn split(&self, split: Split) -> Option<&SplitReport> {
        self.splits.iter().find(|report| report.split == split)
    }
}

impl fmt::Display for OrganizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for split in &self.splits {
            write!(f, "{}", split)?;
            writeln!(f)?;
        }
        writeln!(f, "YOLO dataset created in {}", self.output.display())
    }
}

/// Outcome of organizing one split.
#[derive(Clone, Debug, Serialize)]
pub struct SplitReport {
    pub split: Split,
    /// Non-blank manifest entries.
    pub entries: usize,
    pub images_copied: usize,
    pub labels_copied: usize,
    /// Entries whose image was not found; nothing was copied for them.
    pub missing_images: Vec<String>,
    /// Label names not found for images that were copied.
    pub missing_labels: Vec<String>,
    pub copy_failures: Vec<CopyFailure>,
}

impl SplitReport {
    pub fn new(split: Split, entries: usize) -> Self {
        Self {
            split,
            entries,
            images_copied: 0,
            labels_copied: 0,
            missing_images: Vec::new(),
            missing_labels: Vec::new(),
            copy_failures: Vec::new(),
        }
    }

    /// Returns true if every entry was copied together with its label.
    pub fn is_complete(&self) -> bool {
        self.missing_images.is_empty()
            && self.missing_labels.is_empty()
            && self.copy_failures.is_empty()
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} entries, {} image(s) and {} label(s) copied",
            self.split, self.entries, self.images_copied, self.labels_copied
        )?;

        if !self.missing_images.is_empty() {
            writeln!(
                f,
                "Warning: {} image(s) not found in {}:",
                self.missing_images.len(),
                self.split
            )?;
            write_capped_list(f, &self.missing_images)?;
        }

        if !self.missing_labels.is_empty() {
            writeln!(
                f,
                "Warning: {} label(s) not found in {}:",
                self.missing_labels.len(),
                self.split
            )?;
            write_capped_list(f, &self.missing_labels)?;
        }

        if !self.copy_failures.is_empty() {
            writeln!(f, "Copy failures ({}):", self.copy_failures.len())?;
            write_capped_list(f, &self.copy_failures)?;
        }

        Ok(())
    }
}

/// A file that could not be copied into the organized dataset.
#[derive(Clone, Debug, Serialize)]
pub struct CopyFailure {
    pub path: PathBuf,
    pub message: String,
}

impl CopyFailure {
    pub fn new(path: PathBuf, error: &std::io::Error) -> Self {
        Self {
            path,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
