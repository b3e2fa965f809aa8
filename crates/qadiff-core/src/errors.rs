use qadiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every kind here means "comparison not possible". Expected divergence
/// between two artifacts is never an error: it is reported inside the
/// comparator's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffErrorKind {
    // Comparison not possible
    /// Image dimensions/channels disagree even after width normalization
    ShapeMismatch,
    /// An image with zero height, width or channels
    EmptyImage,
    /// Malformed in-memory input (pixel buffer length, channel count, width)
    InvalidInput,
    /// A table whose rows do not line up with its column names
    InvalidTable,

    // Collaborator boundary
    /// Artifact extension not in the recognised set for its comparator
    UnsupportedFormat,
    /// Artifact bytes could not be decoded or parsed
    Decode,
    Io,
    Serialization,
    Config,

    // Internal
    Internal,
}

impl DiffErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DiffErrorKind::ShapeMismatch => "ERR_SHAPE_MISMATCH",
            DiffErrorKind::EmptyImage => "ERR_EMPTY_IMAGE",
            DiffErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            DiffErrorKind::InvalidTable => "ERR_INVALID_TABLE",
            DiffErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            DiffErrorKind::Decode => "ERR_DECODE",
            DiffErrorKind::Io => "ERR_IO",
            DiffErrorKind::Serialization => "ERR_SERIALIZATION",
            DiffErrorKind::Config => "ERR_CONFIG",
            DiffErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable classification for programmatic handling plus optional
/// context (operation, artifact path, correlation id) for diagnostics.
#[derive(Debug, Clone)]
pub struct DiffError {
    kind: DiffErrorKind,
    op: Option<String>,
    artifact: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl DiffError {
    /// Create a new error with the specified kind
    pub fn new(kind: DiffErrorKind) -> Self {
        Self {
            kind,
            op: None,
            artifact: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the artifact (usually a file path) the error concerns
    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> DiffErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the artifact context, if any
    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(artifact) = &self.artifact {
            write!(f, " (artifact: {})", artifact)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for DiffError {}

// ========== End Error Facility ==========

/// Failures building a [`crate::table::Table`] from rows and column names
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A column name appears more than once
    #[error("Duplicate column name: {name}")]
    DuplicateColumn { name: String },

    /// A row does not have one cell per column
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A record's keys differ from the first record's keys
    #[error("Row {row} does not share the table's column names")]
    ColumnsDiffer { row: usize },
}

impl From<TableError> for DiffError {
    fn from(err: TableError) -> Self {
        DiffError::new(DiffErrorKind::InvalidTable).with_message(err.to_string())
    }
}

impl From<serde_json::Error> for DiffError {
    fn from(err: serde_json::Error) -> Self {
        DiffError::new(DiffErrorKind::Serialization).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (DiffErrorKind::ShapeMismatch, "ERR_SHAPE_MISMATCH"),
            (DiffErrorKind::EmptyImage, "ERR_EMPTY_IMAGE"),
            (DiffErrorKind::UnsupportedFormat, "ERR_UNSUPPORTED_FORMAT"),
            (DiffErrorKind::InvalidTable, "ERR_INVALID_TABLE"),
            (DiffErrorKind::Decode, "ERR_DECODE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = DiffError::new(DiffErrorKind::UnsupportedFormat)
            .with_op("load_table")
            .with_artifact("report.pdf")
            .with_message("expected one of csv, xls, xlsx");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_UNSUPPORTED_FORMAT]"));
        assert!(text.contains("load_table"));
        assert!(text.contains("report.pdf"));
    }

    #[test]
    fn test_table_error_converts_to_invalid_table() {
        let err: DiffError = TableError::DuplicateColumn {
            name: "id".to_string(),
        }
        .into();
        assert_eq!(err.kind(), DiffErrorKind::InvalidTable);
        assert!(err.message().contains("id"));
    }
}
