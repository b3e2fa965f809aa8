//! Error handling for qadiff-io
//!
//! Wraps qadiff-core `DiffError` with loader-specific helpers

use qadiff_core::errors::{DiffError, DiffErrorKind};
use std::path::Path;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

fn artifact(path: &Path) -> String {
    path.display().to_string()
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> DiffError {
    DiffError::new(DiffErrorKind::Io)
        .with_op(operation)
        .with_artifact(artifact(path))
        .with_message(err.to_string())
}

/// Create a decode error for content that could not be parsed
pub fn decode_error(operation: &str, path: &Path, message: impl Into<String>) -> DiffError {
    DiffError::new(DiffErrorKind::Decode)
        .with_op(operation)
        .with_artifact(artifact(path))
        .with_message(message)
}

/// Create an unsupported format error naming the accepted extensions
pub fn unsupported_format(path: &Path, expected: &[&str]) -> DiffError {
    let found = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("<none>");
    DiffError::new(DiffErrorKind::UnsupportedFormat)
        .with_op("require_format")
        .with_artifact(artifact(path))
        .with_message(format!(
            "extension '{}' not in [{}]",
            found,
            expected.join(", ")
        ))
}

/// Create an error from image::ImageError
pub fn from_image(path: &Path, err: image::ImageError) -> DiffError {
    match err {
        image::ImageError::IoError(e) => io_error("load_image", path, e),
        other => decode_error("load_image", path, other.to_string()),
    }
}

/// Create an error from csv::Error
pub fn from_csv(path: &Path, err: csv::Error) -> DiffError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(e) = err.into_kind() {
            return io_error("load_csv", path, e);
        }
        return decode_error("load_csv", path, "csv read failed");
    }
    decode_error("load_csv", path, err.to_string())
}

/// Create an error from calamine::Error
pub fn from_calamine(path: &Path, err: calamine::Error) -> DiffError {
    match err {
        calamine::Error::Io(e) => io_error("load_workbook", path, e),
        other => decode_error("load_workbook", path, other.to_string()),
    }
}

/// Attach the artifact path to an error that lacks one
pub fn at_artifact(path: &Path, err: DiffError) -> DiffError {
    if err.artifact().is_some() {
        err
    } else {
        err.with_artifact(artifact(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_names_expected_set() {
        let err = unsupported_format(Path::new("shot.bmp"), &["jpg", "jpeg", "png"]);
        assert_eq!(err.kind(), DiffErrorKind::UnsupportedFormat);
        assert_eq!(err.artifact(), Some("shot.bmp"));
        assert!(err.message().contains("'bmp'"));
        assert!(err.message().contains("jpg, jpeg, png"));
    }

    #[test]
    fn test_io_error_keeps_operation() {
        let err = io_error(
            "read_json",
            Path::new("a.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.code(), "ERR_IO");
        assert_eq!(err.op(), Some("read_json"));
    }

    #[test]
    fn test_at_artifact_keeps_existing() {
        let err = DiffError::new(DiffErrorKind::Decode).with_artifact("first");
        let err = at_artifact(Path::new("second"), err);
        assert_eq!(err.artifact(), Some("first"));
    }
}
