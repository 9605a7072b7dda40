//! Canonical boundary logging macros

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use wookie_core::log_op_start;
/// log_op_start!("register_service");
/// log_op_start!("remove_widget", widget_id = 7);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use wookie_core::log_op_end;
/// log_op_end!("register_service", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error with its kind and stable code
///
/// # Example
///
/// ```
/// # use wookie_core::{log_op_error, errors::{ExError, ExErrorKind}};
/// let err = ExError::new(ExErrorKind::NotFound);
/// log_op_error!("widget_guid", &err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: &$crate::errors::ExError = $err;
        $crate::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: &$crate::errors::ExError = $err;
        $crate::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($field)*
        );
    }};
}
