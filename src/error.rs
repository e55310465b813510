use std::path::PathBuf;
use thiserror::Error;

use crate::organize::Split;

/// The main error type for ccpd-yolo operations.
///
/// These are the failures that abort a run. Problems with a single image or
/// manifest entry are captured in the batch reports instead.
#[derive(Debug, Error)]
pub enum CcpdYoloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset root not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {split} manifest {}: {source}", path.display())]
    ManifestRead {
        split: Split,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}

/// Why a CCPD filename could not be turned into a bounding box.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FilenameError {
    #[error("expected at least 3 '-'-separated fields, found {fields}")]
    MissingBoxField { fields: usize },

    #[error("box field '{field}' must hold two '_'-separated corners")]
    MalformedBox { field: String },

    #[error("corner '{corner}' must hold two '&'-separated values")]
    MalformedCorner { corner: String },

    #[error("invalid integer '{value}'")]
    InvalidInteger { value: String },
}
