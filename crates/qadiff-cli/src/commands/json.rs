//! JSON command
//!
//! Usage: qadiff json <LEFT> <RIGHT>

use crate::commands::{emit, Output};
use clap::Args;
use qadiff_core::errors::DiffError;
use qadiff_core::report::Verdict;
use qadiff_io::compare_json_files;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct JsonArgs {
    /// Baseline document
    pub left: PathBuf,

    /// Candidate document
    pub right: PathBuf,
}

/// Execute json command
pub fn execute(args: JsonArgs, output: &Output) -> Result<Verdict, DiffError> {
    let doc = compare_json_files(&args.left, &args.right)?;
    emit(&doc, output)
}
