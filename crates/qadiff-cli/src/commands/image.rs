//! Image command
//!
//! Usage: qadiff image <SOURCE> <TARGET> [--baseline-width <PX>]

use crate::commands::{emit, Output};
use crate::config::QadiffConfig;
use clap::Args;
use qadiff_core::errors::DiffError;
use qadiff_core::report::Verdict;
use qadiff_io::compare_image_files;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Baseline image
    pub source: PathBuf,

    /// Candidate image; resampled to the baseline width if widths differ
    pub target: PathBuf,

    /// Width the candidate is resampled to (default: config, then 2160)
    #[arg(short, long)]
    pub baseline_width: Option<usize>,
}

/// Execute image command
pub fn execute(
    args: ImageArgs,
    config: &QadiffConfig,
    output: &Output,
) -> Result<Verdict, DiffError> {
    let baseline_width = args
        .baseline_width
        .unwrap_or(config.image.baseline_width);
    let doc = compare_image_files(&args.source, &args.target, baseline_width)?;
    emit(&doc, output)
}
