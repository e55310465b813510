//! Label-generation report.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::LabelOutcome;
use crate::summary::write_capped_list;

/// Aggregated outcome of a label-generation run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LabelReport {
    /// Worker threads used.
    pub workers: usize,
    /// Images considered.
    pub total: usize,
    /// Label files written.
    pub written: usize,
    /// Per-subfolder counts, in processing order.
    pub folders: Vec<FolderCounts>,
    /// Images that produced no label.
    pub skipped: Vec<SkippedImage>,
}

impl LabelReport {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Fold one job outcome into the report.
    pub fn record(&mut self, outcome: LabelOutcome) {
        self.total += 1;
        match outcome {
            LabelOutcome::Written { subfolder, .. } => {
                self.written += 1;
                self.folder_mut(&subfolder).written += 1;
            }
            LabelOutcome::Skipped {
                subfolder,
                image,
                reason,
            } => {
                self.folder_mut(&subfolder).skipped += 1;
                self.skipped.push(SkippedImage {
                    image,
                    kind: reason.kind(),
                    message: reason.to_string(),
                });
            }
        }
    }

    /// Count of skipped images of the given kind.
    pub fn skipped_count(&self, kind: SkipKind) -> usize {
        self.skipped.iter().filter(|s| s.kind == kind).count()
    }

    /// Returns true if every image produced a label.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    fn folder_mut(&mut self, name: &str) -> &mut FolderCounts {
        let index = match self.folders.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                self.folders.push(FolderCounts {
                    name: name.to_string(),
                    ..Default::default()
                });
                self.folders.len() - 1
            }
        };
        &mut self.folders[index]
    }
}

impl fmt::Display for LabelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Labels: {} of {} image(s) written with {} worker(s)",
            self.written, self.total, self.workers
        )?;

        for folder in &self.folders {
            writeln!(
                f,
                "  {}: {} written, {} skipped",
                folder.name, folder.written, folder.skipped
            )?;
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped ({}):", self.skipped.len())?;
            write_capped_list(f, &self.skipped)?;
        }

        Ok(())
    }
}

/// Written/skipped counts for one image subfolder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FolderCounts {
    pub name: String,
    pub written: usize,
    pub skipped: usize,
}

/// An image that produced no label file.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedImage {
    pub image: PathBuf,
    pub kind: SkipKind,
    pub message: String,
}

impl fmt::Display for SkippedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.image.display(), self.message)
    }
}

/// Stable skip codes for programmatic consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    /// The filename does not carry a decodable plate box.
    MalformedFilename,
    /// The image header could not be read.
    UnreadableImage,
    /// The label file could not be written.
    WriteFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilenameError;
    use crate::generate::SkipReason;

    fn written(subfolder: &str, name: &str) -> LabelOutcome {
        LabelOutcome::Written {
            subfolder: subfolder.to_string(),
            image: PathBuf::from(name),
            label: PathBuf::from(name).with_extension("txt"),
        }
    }

    fn skipped(subfolder: &str, name: &str) -> LabelOutcome {
        LabelOutcome::Skipped {
            subfolder: subfolder.to_string(),
            image: PathBuf::from(name),
            reason: SkipReason::MalformedFilename(FilenameError::MissingBoxField { fields: 1 }),
        }
    }

    #[test]
    fn record_tracks_folders_in_first_seen_order() {
        let mut report = LabelReport::new(4);
        report.record(written("ccpd_base", "a.jpg"));
        report.record(skipped("ccpd_blur", "b.jpg"));
        report.record(written("ccpd_base", "c.jpg"));

        assert_eq!(report.total, 3);
        assert_eq!(report.written, 2);
        assert!(!report.is_complete());
        assert_eq!(report.skipped_count(SkipKind::MalformedFilename), 1);
        assert_eq!(report.skipped_count(SkipKind::UnreadableImage), 0);
        assert_eq!(
            report.folders,
            vec![
                FolderCounts {
                    name: "ccpd_base".to_string(),
                    written: 2,
                    skipped: 0,
                },
                FolderCounts {
                    name: "ccpd_blur".to_string(),
                    written: 0,
                    skipped: 1,
                },
            ]
        );
    }

    #[test]
    fn display_truncates_long_skip_lists() {
        let mut report = LabelReport::new(1);
        for i in 0..13 {
            report.record(skipped("ccpd_base", &format!("bad{i}.jpg")));
        }

        let text = report.to_string();
        assert!(text.contains("Skipped (13):"));
        assert!(text.contains("bad9.jpg"));
        assert!(!text.contains("bad10.jpg"));
        assert!(text.contains("... and 3 more"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = LabelReport::new(2);
        report.record(skipped("ccpd_fn", "x.jpg"));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"workers\":2"));
        assert!(json.contains("\"kind\":\"malformed_filename\""));
    }
}
