//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.
//! Call sites need `tracing` and `qadiff_core_types` as dependencies.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use qadiff_core::log_op_start;
/// log_op_start!("compare_images");
/// log_op_start!("compare_images", source = "a.png");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = qadiff_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = qadiff_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use qadiff_core::log_op_end;
/// log_op_end!("compare_images", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = qadiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = qadiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use qadiff_core::log_op_error;
/// # use qadiff_core::errors::{DiffError, DiffErrorKind};
/// let err = DiffError::new(DiffErrorKind::ShapeMismatch);
/// log_op_error!("compare_images", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::DiffError;
        let diff_err: DiffError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = qadiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?diff_err.kind(),
            err.code = diff_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::DiffError;
        let diff_err: DiffError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = qadiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?diff_err.kind(),
            err.code = diff_err.code(),
            $($field)*
        );
    }};
}
