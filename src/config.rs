//! Dataset layout configuration.
//!
//! Every directory the two tools touch is described by a [`DatasetLayout`].
//! The defaults follow the CCPD2019 release; a YAML file can override any
//! subset of fields:
//!
//! ```yaml
//! root: /data/CCPD2019
//! test_subfolders: [ccpd_db, ccpd_blur]
//! yolo_dir: yolo_small
//! ```
//!
//! Relative paths inside the layout are resolved against `root`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CcpdYoloError;
use crate::organize::Split;

/// Image subfolders shipped with CCPD2019, one per capture condition.
pub const CCPD_SUBFOLDERS: [&str; 8] = [
    "ccpd_base",
    "ccpd_blur",
    "ccpd_challenge",
    "ccpd_db",
    "ccpd_fn",
    "ccpd_rotate",
    "ccpd_tilt",
    "ccpd_weather",
];

/// Subfolders searched, in order, for test images and labels.
pub const CCPD_TEST_SUBFOLDERS: [&str; 6] = [
    "ccpd_db",
    "ccpd_blur",
    "ccpd_fn",
    "ccpd_rotate",
    "ccpd_tilt",
    "ccpd_challenge",
];

/// Where the CCPD dataset lives and where prepared files go.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetLayout {
    /// Dataset root holding the `ccpd_*` image folders.
    pub root: PathBuf,
    /// Image subfolders the label generator scans.
    pub label_subfolders: Vec<String>,
    /// Image subfolder that holds train and val images.
    pub train_val_folder: String,
    /// Image subfolders searched in order for test images.
    pub test_subfolders: Vec<String>,
    /// Root of the generated `labels/<subfolder>/` tree.
    pub labels_dir: PathBuf,
    /// Directory holding the split manifests.
    pub splits_dir: PathBuf,
    /// Root of the organized `{images,labels}/{train,val,test}` tree.
    pub yolo_dir: PathBuf,
    /// Manifest file names, relative to `splits_dir`.
    pub manifests: ManifestNames,
}

/// Manifest file name for each split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestNames {
    pub train: String,
    pub val: String,
    pub test: String,
}

impl Default for ManifestNames {
    fn default() -> Self {
        Self {
            train: "train.txt".to_string(),
            val: "val.txt".to_string(),
            test: "test.txt".to_string(),
        }
    }
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("CCPD2019"),
            label_subfolders: CCPD_SUBFOLDERS.iter().map(|s| s.to_string()).collect(),
            train_val_folder: "ccpd_base".to_string(),
            test_subfolders: CCPD_TEST_SUBFOLDERS.iter().map(|s| s.to_string()).collect(),
            labels_dir: PathBuf::from("labels"),
            splits_dir: PathBuf::from("splits"),
            yolo_dir: PathBuf::from("yolo"),
            manifests: ManifestNames::default(),
        }
    }
}

impl DatasetLayout {
    /// Default CCPD layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Load a layout from a YAML file. Missing fields keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, CcpdYoloError> {
        let text = fs::read_to_string(path).map_err(|source| CcpdYoloError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| CcpdYoloError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fails with [`CcpdYoloError::RootNotFound`] unless `root` is a directory.
    pub fn ensure_root(&self) -> Result<(), CcpdYoloError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(CcpdYoloError::RootNotFound {
                path: self.root.clone(),
            })
        }
    }

    /// Directory of images for one CCPD subfolder.
    pub fn image_dir(&self, subfolder: &str) -> PathBuf {
        self.root.join(subfolder)
    }

    pub fn labels_root(&self) -> PathBuf {
        self.root.join(&self.labels_dir)
    }

    /// Directory of generated labels for one CCPD subfolder.
    pub fn label_dir(&self, subfolder: &str) -> PathBuf {
        self.labels_root().join(subfolder)
    }

    pub fn manifest_path(&self, split: Split) -> PathBuf {
        let name = match split {
            Split::Train => &self.manifests.train,
            Split::Val => &self.manifests.val,
            Split::Test => &self.manifests.test,
        };
        self.root.join(&self.splits_dir).join(name)
    }

    pub fn yolo_root(&self) -> PathBuf {
        self.root.join(&self.yolo_dir)
    }

    /// Destination `images/<split>` directory.
    pub fn yolo_images_dir(&self, split: Split) -> PathBuf {
        self.yolo_root().join("images").join(split.name())
    }

    /// Destination `labels/<split>` directory.
    pub fn yolo_labels_dir(&self, split: Split) -> PathBuf {
        self.yolo_root().join("labels").join(split.name())
    }

    /// Image subfolders searched for a split's images, in priority order.
    pub fn source_folders(&self, split: Split) -> Vec<&str> {
        match split {
            Split::Train | Split::Val => vec![self.train_val_folder.as_str()],
            Split::Test => self.test_subfolders.iter().map(String::as_str).collect(),
        }
    }
}
