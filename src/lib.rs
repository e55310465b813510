//! ccpd-yolo: prepare the CCPD2019 license-plate dataset for YOLO training.
//!
//! CCPD2019 publishes its plate annotations inside the image filenames. This
//! crate turns those filenames into YOLO label files and lays the images and
//! labels out in the `images/` + `labels/` split structure YOLO trainers
//! expect.
//!
//! # Modules
//!
//! - [`ccpd`]: decoding the plate box from a CCPD filename
//! - [`bbox`]: pixel and normalized bounding boxes
//! - [`label`]: YOLO label lines
//! - [`generate`]: parallel label generation over the dataset
//! - [`organize`]: copying images and labels into train/val/test splits
//! - [`config`]: the dataset directory layout
//! - [`error`]: error types

pub mod bbox;
pub mod ccpd;
pub mod config;
pub mod error;
pub mod generate;
pub mod label;
pub mod organize;
mod progress;
mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use config::DatasetLayout;
pub use error::{CcpdYoloError, FilenameError};
pub use generate::{generate_labels, GenerateOptions, LabelReport};
pub use organize::{organize_dataset, OrganizeReport, Split, SplitReport};

/// The ccpd-yolo CLI application.
#[derive(Parser)]
#[command(name = "ccpd-yolo")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write a YOLO label file for every CCPD image.
    Labels(LabelsArgs),
    /// Copy images and labels into train/val/test splits.
    Organize(OrganizeArgs),
}

/// Options shared by every subcommand for locating the dataset.
#[derive(clap::Args)]
struct LayoutArgs {
    /// Dataset root holding the ccpd_* image folders.
    #[arg(long, env = "CCPD_ROOT")]
    root: Option<PathBuf>,

    /// YAML file overriding parts of the default CCPD layout.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl LayoutArgs {
    /// Build the layout: defaults, then the config file, then `--root`.
    fn resolve(&self) -> Result<DatasetLayout, CcpdYoloError> {
        let mut layout = match &self.config {
            Some(path) => DatasetLayout::from_yaml_file(path)?,
            None => DatasetLayout::default(),
        };
        if let Some(root) = &self.root {
            layout.root = root.clone();
        }
        Ok(layout)
    }
}

/// Arguments for the labels subcommand.
#[derive(clap::Args)]
struct LabelsArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Number of worker threads (default: available CPUs, at most 16).
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Do not draw a progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the organize subcommand.
#[derive(clap::Args)]
struct OrganizeArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Only organize this split (destination folders for all splits are
    /// still created).
    #[arg(long, value_enum)]
    split: Option<SplitArg>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// CLI spelling of [`Split`], kept apart from the library type.
#[derive(Clone, Copy, ValueEnum)]
enum SplitArg {
    Train,
    Val,
    Test,
}

impl From<SplitArg> for Split {
    fn from(value: SplitArg) -> Self {
        match value {
            SplitArg::Train => Split::Train,
            SplitArg::Val => Split::Val,
            SplitArg::Test => Split::Test,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ReportOutput {
    Text,
    Json,
}

fn parse_output(raw: &str) -> Result<ReportOutput, CcpdYoloError> {
    match raw {
        "text" => Ok(ReportOutput::Text),
        "json" => Ok(ReportOutput::Json),
        other => Err(CcpdYoloError::UnsupportedOutput(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn print_report<R>(report: &R, output: ReportOutput) -> Result<(), CcpdYoloError>
where
    R: serde::Serialize + std::fmt::Display,
{
    match output {
        ReportOutput::Json => println!("{}", serde_json::to_string_pretty(report)?),
        ReportOutput::Text => print!("{}", report),
    }
    Ok(())
}

/// Run the ccpd-yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CcpdYoloError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Labels(args)) => run_labels(args),
        Some(Commands::Organize(args)) => run_organize(args),
        None => {
            println!("ccpd-yolo {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Prepare the CCPD2019 dataset for YOLO training.");
            println!();
            println!("Run 'ccpd-yolo --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the labels subcommand.
fn run_labels(args: LabelsArgs) -> Result<(), CcpdYoloError> {
    let output = parse_output(&args.output)?;
    let layout = args.layout.resolve()?;

    let opts = GenerateOptions {
        jobs: args.jobs,
        progress: !args.no_progress && output == ReportOutput::Text,
    };
    let report = generate_labels(&layout, &opts)?;

    print_report(&report, output)
}

/// Execute the organize subcommand.
///
/// Text output prints each split's summary as soon as it is done, so a later
/// manifest failure does not hide the splits already copied.
fn run_organize(args: OrganizeArgs) -> Result<(), CcpdYoloError> {
    let output = parse_output(&args.output)?;
    let layout = args.layout.resolve()?;

    let print_split = |split: &SplitReport| {
        if output == ReportOutput::Text {
            println!("{}", split);
        }
    };

    let report = match args.split {
        Some(split) => {
            layout.ensure_root()?;
            organize::prepare_output_dirs(&layout)?;
            let split_report = organize::organize_split(&layout, split.into())?;
            print_split(&split_report);
            let mut report = OrganizeReport::new(layout.yolo_root());
            report.splits.push(split_report);
            report
        }
        None => organize::organize_dataset_with(&layout, print_split)?,
    };

    match output {
        ReportOutput::Json => print_report(&report, output),
        ReportOutput::Text => {
            println!("YOLO dataset created in {}", report.output.display());
            Ok(())
        }
    }
}
