//! qadiff I/O - decoding artifacts, driving the comparators, writing reports
//!
//! This crate provides:
//! - Extension-based format recognition (`format`)
//! - Loaders turning files into `PixelGrid`, `TreeNode` and `Table`
//! - File-level comparison commands that own boundary logging (`commands`)
//! - The atomic report writer (`report_writer`)

pub mod commands;
pub mod errors;
pub mod format;
pub mod image_loader;
pub mod report_writer;
pub mod table_loader;
pub mod tree_loader;

pub use commands::{compare_image_files, compare_json_files, compare_table_files};
pub use format::{require_format, Format};
pub use report_writer::{write_report, WrittenReport};
