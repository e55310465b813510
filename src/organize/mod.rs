//! Train/val/test split organization.
//!
//! Copies the images named in each split manifest, together with their
//! generated labels, into `yolo/{images,labels}/<split>/`. Processing is
//! sequential. Records are handled as follows:
//!
//! - image not found: logged and recorded, the record is skipped and no label
//!   copy is attempted;
//! - image found, label not found: the image is still copied and the label
//!   name is listed in the split's missing-label summary;
//! - copy failure: logged and recorded, the run continues.
//!
//! Nothing is rolled back; files copied before a fatal error stay in place.

mod manifest;
mod report;

pub use manifest::{entry_file_name, parse_manifest, read_manifest};
pub use report::{CopyFailure, OrganizeReport, SplitReport};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::Serialize;

use crate::ccpd::label_file_name;
use crate::config::DatasetLayout;
use crate::error::CcpdYoloError;

/// A dataset partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// All splits in processing order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    /// Directory and manifest name of the split.
    pub fn name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create every destination directory up front.
///
/// The `images/` and `labels/` directories for all splits exist afterwards,
/// even if every manifest turns out to be empty.
pub fn prepare_output_dirs(layout: &DatasetLayout) -> Result<(), CcpdYoloError> {
    for split in Split::ALL {
        create_split_dirs(layout, split)?;
    }
    Ok(())
}

fn create_split_dirs(layout: &DatasetLayout, split: Split) -> Result<(), CcpdYoloError> {
    for dir in [layout.yolo_images_dir(split), layout.yolo_labels_dir(split)] {
        fs::create_dir_all(&dir)
            .map_err(|source| CcpdYoloError::OutputDirCreate { path: dir, source })?;
    }
    Ok(())
}

/// First existing file among `candidates`.
fn find_first(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

/// Copy `src` into `dest_dir`, keeping its file name.
fn copy_into(src: &Path, dest_dir: &Path, file_name: &str) -> std::io::Result<()> {
    fs::copy(src, dest_dir.join(file_name)).map(|_| ())
}

/// Organize a single split from its manifest.
///
/// An unreadable manifest is fatal for the split.
pub fn organize_split(layout: &DatasetLayout, split: Split) -> Result<SplitReport, CcpdYoloError> {
    create_split_dirs(layout, split)?;

    let manifest_path = layout.manifest_path(split);
    let entries = read_manifest(&manifest_path).map_err(|source| CcpdYoloError::ManifestRead {
        split,
        path: manifest_path.clone(),
        source,
    })?;
    info!("Processing {}, total: {}", split, entries.len());

    let images_dest = layout.yolo_images_dir(split);
    let labels_dest = layout.yolo_labels_dir(split);
    let folders = layout.source_folders(split);

    let mut report = SplitReport::new(split, entries.len());

    for entry in &entries {
        let Some(name) = entry_file_name(entry) else {
            warn!("Manifest entry '{}' has no file name, skipping", entry);
            report.missing_images.push(entry.clone());
            continue;
        };

        let Some(image) = find_first(folders.iter().map(|f| layout.image_dir(f).join(name)))
        else {
            warn!("{} image not found: {}", split, name);
            report.missing_images.push(name.to_string());
            continue;
        };

        let label_name = label_file_name(name);
        let label = find_first(
            folders
                .iter()
                .map(|f| layout.label_dir(f).join(&label_name)),
        );

        match copy_into(&image, &images_dest, name) {
            Ok(()) => report.images_copied += 1,
            Err(e) => {
                error!("Failed to copy {}: {}", image.display(), e);
                report.copy_failures.push(CopyFailure::new(image, &e));
            }
        }

        match label {
            Some(label) => match copy_into(&label, &labels_dest, &label_name) {
                Ok(()) => report.labels_copied += 1,
                Err(e) => {
                    error!("Failed to copy {}: {}", label.display(), e);
                    report.copy_failures.push(CopyFailure::new(label, &e));
                }
            },
            None => report.missing_labels.push(label_name),
        }
    }

    if !report.missing_labels.is_empty() {
        warn!(
            "{} label(s) not found in {}",
            report.missing_labels.len(),
            split
        );
    }
    info!("{}: OK", split);

    Ok(report)
}

/// Organize train, val and test, in that order.
///
/// Destination directories for every split are created before the first
/// manifest is read. The first unreadable manifest aborts the run.
pub fn organize_dataset(layout: &DatasetLayout) -> Result<OrganizeReport, CcpdYoloError> {
    organize_dataset_with(layout, |_| {})
}

/// Like [`organize_dataset`], calling `on_split` as soon as each split is
/// done, before the next manifest is read.
pub fn organize_dataset_with<F>(
    layout: &DatasetLayout,
    mut on_split: F,
) -> Result<OrganizeReport, CcpdYoloError>
where
    F: FnMut(&SplitReport),
{
    layout.ensure_root()?;
    prepare_output_dirs(layout)?;

    let mut report = OrganizeReport::new(layout.yolo_root());
    for split in Split::ALL {
        let split_report = organize_split(layout, split)?;
        on_split(&split_report);
        report.splits.push(split_report);
    }
    info!("YOLO dataset created in {}", layout.yolo_root().display());

    Ok(report)
}
