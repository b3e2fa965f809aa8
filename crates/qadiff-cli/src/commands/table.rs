//! Table command
//!
//! Usage: qadiff table <LEFT> <RIGHT> [--key-column <NAME>]

use crate::commands::{emit, Output};
use crate::config::QadiffConfig;
use clap::Args;
use qadiff_core::errors::DiffError;
use qadiff_core::report::Verdict;
use qadiff_io::compare_table_files;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Baseline table
    pub left: PathBuf,

    /// Candidate table
    pub right: PathBuf,

    /// Sort both tables descending by this column before comparing
    #[arg(short, long)]
    pub key_column: Option<String>,
}

/// Execute table command
pub fn execute(
    args: TableArgs,
    config: &QadiffConfig,
    output: &Output,
) -> Result<Verdict, DiffError> {
    let key_column = args.key_column.or_else(|| config.table.key_column.clone());
    let doc = compare_table_files(&args.left, &args.right, key_column.as_deref())?;
    emit(&doc, output)
}
