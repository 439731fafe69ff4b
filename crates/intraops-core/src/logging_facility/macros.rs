//! Canonical logging macros
//!
//! Every macro stamps `component`, `op` and `event`; extra `key = value`
//! fields are passed straight through to `tracing`.

/// Log the start of an operation
///
/// ```
/// # use intraops_core::log_op_start;
/// log_op_start!("account_group.create");
/// log_op_start!("account_group.create", message_kind = "command");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use intraops_core::log_op_end;
/// log_op_end!("account_group.create", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` must be an `ExError` (it is borrowed, not consumed).
///
/// ```
/// # use intraops_core::log_op_error;
/// # use intraops_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::NotFound);
/// log_op_error!("account_group.get", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}

/// Log an operation the pipeline refused to run (denied, invalid, cancelled)
///
/// ```
/// # use intraops_core::log_op_rejected;
/// # use intraops_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Forbidden);
/// log_op_rejected!("account_group.delete", err);
/// ```
#[macro_export]
macro_rules! log_op_rejected {
    ($op:expr, $err:expr) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_REJECTED,
            err_code = ex_err.code(),
            reason = ex_err.message(),
        );
    }};
    ($op:expr, $err:expr, $($field:tt)*) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::__core_types::schema::EVENT_REJECTED,
            err_code = ex_err.code(),
            reason = ex_err.message(),
            $($field)*
        );
    }};
}
