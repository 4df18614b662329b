//! Operation logging macros
//!
//! Repository and schema calls emit a `start` event, then either `end` or
//! `end_error`. Each event carries `component` (the calling module), `op`
//! and `event`; extra `key = value` fields are passed through to `tracing`.

/// `start` event at info level
///
/// ```
/// # use scoreboard_core::log_op_start;
/// log_op_start!("team.save");
/// log_op_start!("team.save", entity_id = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($extra:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START
            $(, $($extra)+)?
        )
    };
}

/// `end` event at info level; `duration_ms` is required
///
/// ```
/// # use scoreboard_core::log_op_end;
/// log_op_end!("team.load_all", duration_ms = 3, rows = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $ms:expr $(, $($extra:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $ms
            $(, $($extra)+)?
        )
    };
}

/// `end_error` event at error level with the error's kind, code and message
///
/// Takes the error by reference so the caller can still return it.
///
/// ```
/// # use scoreboard_core::log_op_error;
/// # use scoreboard_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::NotFound);
/// log_op_error!("team.delete", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $ms:expr $(, $($extra:tt)+)?) => {{
        let failure: &$crate::errors::ExError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $ms,
            err_kind = ?failure.kind(),
            err_code = failure.code(),
            err_message = failure.message()
            $(, $($extra)+)?
        )
    }};
}
