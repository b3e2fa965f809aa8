//! `qadiff.toml` configuration.
//!
//! Every section and key is optional. Command-line flags override values
//! read from the file.

use qadiff_core::errors::{DiffError, DiffErrorKind};
use qadiff_core::logging_facility::Profile;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "qadiff.toml";

/// Canonical screenshot width targets are resampled to.
pub const DEFAULT_BASELINE_WIDTH: usize = 2160;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QadiffConfig {
    pub image: ImageConfig,
    pub table: TableConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    pub baseline_width: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            baseline_width: DEFAULT_BASELINE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub key_column: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory reports are written to; none means no report files
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl QadiffConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// - `Config`: malformed TOML, unknown keys or wrong value types
    pub fn from_toml(text: &str) -> Result<Self, DiffError> {
        toml::from_str(text).map_err(|e| {
            DiffError::new(DiffErrorKind::Config)
                .with_op("parse_config")
                .with_message(e.to_string())
        })
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `qadiff.toml` in the working
    /// directory is used if present, defaults otherwise.
    ///
    /// # Errors
    ///
    /// - `Config`: the explicit file is missing, unreadable or invalid
    pub fn load(explicit: Option<&Path>) -> Result<Self, DiffError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            DiffError::new(DiffErrorKind::Config)
                .with_op("load_config")
                .with_artifact(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml(&text).map_err(|e| e.with_artifact(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = QadiffConfig::from_toml("").unwrap();
        assert_eq!(config.image.baseline_width, DEFAULT_BASELINE_WIDTH);
        assert_eq!(config.table.key_column, None);
        assert_eq!(config.report.dir, None);
        assert_eq!(config.logging.profile, Profile::Development);
    }

    #[test]
    fn test_full_config() {
        let config = QadiffConfig::from_toml(
            r#"
            [image]
            baseline_width = 1080

            [table]
            key_column = "id"

            [report]
            dir = "out/reports"

            [logging]
            profile = "production"
            "#,
        )
        .unwrap();

        assert_eq!(config.image.baseline_width, 1080);
        assert_eq!(config.table.key_column.as_deref(), Some("id"));
        assert_eq!(config.report.dir, Some(PathBuf::from("out/reports")));
        assert_eq!(config.logging.profile, Profile::Production);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = QadiffConfig::from_toml("[image]\nwidth = 3\n").unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::Config);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = QadiffConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::Config);
    }
}
