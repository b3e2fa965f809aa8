//! Shared diff report model and human-readable rendering.
//!
//! Every comparator result converts into a [`DiffReport`], which carries a
//! single [`Verdict`] callers can branch on without knowing the artifact
//! kind.

pub mod human_summary;
pub mod model;

pub use human_summary::{render_document_summary, render_human_summary};
pub use model::{ArtifactKind, DiffReport, ReportDocument, Verdict, REPORT_SCHEMA_VERSION};
