//! Subcommand implementations and shared output handling.

use qadiff_core::errors::DiffError;
use qadiff_core::report::{render_document_summary, ArtifactKind, ReportDocument, Verdict};
use qadiff_io::write_report;
use std::path::{Path, PathBuf};

pub mod image;
pub mod json;
pub mod table;

pub const EXIT_EQUAL: i32 = 0;
pub const EXIT_DIFFERENT: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Where and how a finished comparison is reported.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub report_dir: Option<PathBuf>,
    pub json: bool,
}

pub fn exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Equal => EXIT_EQUAL,
        Verdict::ValuesDiffer | Verdict::StructureDiffers => EXIT_DIFFERENT,
    }
}

/// Print the report to stdout and, if configured, persist it.
pub fn emit(doc: &ReportDocument, output: &Output) -> Result<Verdict, DiffError> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(doc)?);
    } else {
        print!("{}", render_document_summary(doc));
    }

    if let Some(dir) = &output.report_dir {
        let stem = report_stem(doc.report.kind(), &doc.source, &doc.target);
        let written = write_report(dir, &stem, doc)?;
        eprintln!("✓ Report written to {}", written.json_path.display());
    }

    Ok(doc.verdict)
}

/// `<kind>_<source stem>_vs_<target stem>`
pub fn report_stem(kind: ArtifactKind, source: &str, target: &str) -> String {
    format!("{}_{}_vs_{}", kind, file_stem(source), file_stem(target))
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("artifact")
        .to_string()
}
