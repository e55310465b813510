//! YOLO label generation from CCPD filenames.
//!
//! Every `.jpg` in the configured subfolders becomes one job. A job decodes
//! the plate box from the filename, reads the image header for its size and
//! writes a one-line label to `labels/<subfolder>/<stem>.txt`. Jobs share
//! nothing and run on a fixed-size rayon pool; a failing job is logged and
//! recorded in the [`LabelReport`] without stopping the others.

mod report;

pub use report::{FolderCounts, LabelReport, SkipKind, SkippedImage};

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use log::{debug, error, info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::ccpd::{is_ccpd_image, label_file_name, parse_plate_box};
use crate::config::DatasetLayout;
use crate::error::{CcpdYoloError, FilenameError};
use crate::label::YoloLabel;
use crate::progress::create_progress_bar;

/// Upper bound on label-generation workers, whatever the machine offers.
pub const MAX_WORKERS: usize = 16;

/// Options for a label-generation run.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Worker count; `None` uses the available parallelism.
    pub jobs: Option<usize>,
    /// Draw a progress bar while processing.
    pub progress: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            jobs: None,
            progress: true,
        }
    }
}

/// One image to label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelJob {
    pub subfolder: String,
    pub image: PathBuf,
    pub label: PathBuf,
}

/// The result of processing a single [`LabelJob`].
#[derive(Debug)]
pub enum LabelOutcome {
    Written {
        subfolder: String,
        image: PathBuf,
        label: PathBuf,
    },
    Skipped {
        subfolder: String,
        image: PathBuf,
        reason: SkipReason,
    },
}

/// Why an image produced no label file.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("malformed filename: {0}")]
    MalformedFilename(#[from] FilenameError),

    #[error("unreadable image: {0}")]
    UnreadableImage(String),

    #[error("failed to write label: {0}")]
    WriteFailed(String),
}

impl SkipReason {
    pub fn kind(&self) -> SkipKind {
        match self {
            SkipReason::MalformedFilename(_) => SkipKind::MalformedFilename,
            SkipReason::UnreadableImage(_) => SkipKind::UnreadableImage,
            SkipReason::WriteFailed(_) => SkipKind::WriteFailed,
        }
    }
}

/// Resolve the number of workers for a run.
///
/// Always within `1..=MAX_WORKERS`.
pub fn worker_count(requested: Option<usize>) -> usize {
    let wanted = requested.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    });
    wanted.clamp(1, MAX_WORKERS)
}

/// List the label jobs for every configured subfolder.
///
/// Subfolders missing from the dataset root are skipped with a warning.
/// Jobs are ordered by subfolder (configuration order) then file name.
pub fn collect_jobs(layout: &DatasetLayout) -> Result<Vec<LabelJob>, CcpdYoloError> {
    layout.ensure_root()?;

    let mut jobs = Vec::new();
    for subfolder in &layout.label_subfolders {
        let image_dir = layout.image_dir(subfolder);
        if !image_dir.is_dir() {
            warn!(
                "Image folder {} not found, skipping",
                image_dir.display()
            );
            continue;
        }

        let label_dir = layout.label_dir(subfolder);
        let before = jobs.len();

        for entry in WalkDir::new(&image_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let image = match entry {
                Ok(entry) if entry.file_type().is_file() => entry.into_path(),
                Ok(_) => continue,
                // The folder listing itself failed.
                Err(source) if source.depth() == 0 => {
                    return Err(CcpdYoloError::DirectoryRead {
                        path: image_dir.clone(),
                        source,
                    });
                }
                // One entry could not be stat'ed (e.g. a dangling symlink).
                // It stays a job so the image read reports it as a skip.
                Err(err) => match err.path() {
                    Some(path) => path.to_path_buf(),
                    None => {
                        warn!("Cannot inspect entry in {}: {}", image_dir.display(), err);
                        continue;
                    }
                },
            };

            if !is_ccpd_image(&image) {
                continue;
            }

            let Some(name) = image.file_name().and_then(|name| name.to_str()) else {
                warn!("Skipping non UTF-8 file name {}", image.display());
                continue;
            };
            let label = label_dir.join(label_file_name(name));

            jobs.push(LabelJob {
                subfolder: subfolder.clone(),
                image,
                label,
            });
        }

        info!("{}: {} images", subfolder, jobs.len() - before);
    }

    Ok(jobs)
}

/// Label a single image. Never fails; failures come back as
/// [`LabelOutcome::Skipped`].
pub fn process_image(job: &LabelJob) -> LabelOutcome {
    match write_label_for(job) {
        Ok(()) => {
            debug!("Wrote {}", job.label.display());
            LabelOutcome::Written {
                subfolder: job.subfolder.clone(),
                image: job.image.clone(),
                label: job.label.clone(),
            }
        }
        Err(reason) => {
            error!("Error processing {}: {}", job.image.display(), reason);
            LabelOutcome::Skipped {
                subfolder: job.subfolder.clone(),
                image: job.image.clone(),
                reason,
            }
        }
    }
}

fn write_label_for(job: &LabelJob) -> Result<(), SkipReason> {
    let name = job
        .image
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let bbox = parse_plate_box(name)?;

    let (width, height) = read_image_dimensions(&job.image)?;
    let yolo = bbox.to_yolo(width as f64, height as f64);
    if !yolo.is_inside_image() {
        warn!(
            "Plate box of {} extends outside the {}x{} image",
            job.image.display(),
            width,
            height
        );
    }

    let line = YoloLabel::plate(yolo).to_string();
    if let Some(parent) = job.label.parent() {
        fs::create_dir_all(parent).map_err(|e| SkipReason::WriteFailed(e.to_string()))?;
    }
    fs::write(&job.label, line).map_err(|e| SkipReason::WriteFailed(e.to_string()))
}

fn read_image_dimensions(path: &Path) -> Result<(usize, usize), SkipReason> {
    let size = imagesize::size(path).map_err(|e| SkipReason::UnreadableImage(e.to_string()))?;
    if size.width == 0 || size.height == 0 {
        return Err(SkipReason::UnreadableImage(format!(
            "image reports {}x{} pixels",
            size.width, size.height
        )));
    }
    Ok((size.width, size.height))
}

/// Run `process_image` over `jobs` on a pool of `workers` threads.
///
/// Outcomes come back in job order.
pub fn run_jobs(
    jobs: &[LabelJob],
    workers: usize,
    progress: bool,
) -> Result<Vec<LabelOutcome>, CcpdYoloError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let pb = create_progress_bar(jobs.len() as u64, "labels", progress);
    let outcomes = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let outcome = process_image(job);
                pb.inc(1);
                outcome
            })
            .collect::<Vec<_>>()
    });
    pb.finish_and_clear();

    Ok(outcomes)
}

/// Generate YOLO labels for every image in the layout.
pub fn generate_labels(
    layout: &DatasetLayout,
    opts: &GenerateOptions,
) -> Result<LabelReport, CcpdYoloError> {
    let jobs = collect_jobs(layout)?;
    let workers = worker_count(opts.jobs);
    info!(
        "Processing {} images with {} worker(s)",
        jobs.len(),
        workers
    );

    let outcomes = run_jobs(&jobs, workers, opts.progress)?;

    let mut report = LabelReport::new(workers);
    for outcome in outcomes {
        report.record(outcome);
    }
    info!(
        "Wrote {} label(s), skipped {}",
        report.written,
        report.skipped.len()
    );

    Ok(report)
}
