//! Artifact format recognition by file extension.

use crate::errors::{unsupported_format, Result};
use qadiff_core::report::ArtifactKind;
use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const TREE_EXTENSIONS: &[&str] = &["json"];
pub const TABLE_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

/// A recognized artifact file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Png,
    Jpeg,
    Json,
    Csv,
    Xls,
    Xlsx,
}

impl Format {
    /// Recognize a format from the path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Format::Png),
            "jpg" | "jpeg" => Some(Format::Jpeg),
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            "xls" => Some(Format::Xls),
            "xlsx" => Some(Format::Xlsx),
            _ => None,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Format::Png | Format::Jpeg => ArtifactKind::Image,
            Format::Json => ArtifactKind::Tree,
            Format::Csv | Format::Xls | Format::Xlsx => ArtifactKind::Table,
        }
    }
}

/// Extensions accepted for an artifact kind.
pub fn expected_extensions(kind: ArtifactKind) -> &'static [&'static str] {
    match kind {
        ArtifactKind::Image => IMAGE_EXTENSIONS,
        ArtifactKind::Tree => TREE_EXTENSIONS,
        ArtifactKind::Table => TABLE_EXTENSIONS,
    }
}

/// Recognize `path` and require it to belong to `kind`.
///
/// # Errors
///
/// - `UnsupportedFormat`: unknown extension, or one belonging to another kind
pub fn require_format(path: &Path, kind: ArtifactKind) -> Result<Format> {
    match Format::from_path(path) {
        Some(format) if format.kind() == kind => Ok(format),
        _ => Err(unsupported_format(path, expected_extensions(kind))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qadiff_core::errors::DiffErrorKind;

    #[test]
    fn test_extensions_are_case_insensitive() {
        assert_eq!(Format::from_path(Path::new("a.PNG")), Some(Format::Png));
        assert_eq!(Format::from_path(Path::new("b.JpEg")), Some(Format::Jpeg));
        assert_eq!(Format::from_path(Path::new("c.XLSX")), Some(Format::Xlsx));
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(Format::from_path(Path::new("a.gif")), None);
        assert_eq!(Format::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_require_format_rejects_other_kind() {
        let err = require_format(Path::new("data.csv"), ArtifactKind::Image).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::UnsupportedFormat);

        let ok = require_format(Path::new("data.csv"), ArtifactKind::Table).unwrap();
        assert_eq!(ok, Format::Csv);
    }
}
