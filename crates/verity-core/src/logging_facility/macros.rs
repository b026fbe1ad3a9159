//! Canonical logging macros
//!
//! Every check that reaches the reporter logs through these, so captured
//! events always carry `component`, `op` and `event`.

/// Log a failed check
///
/// `$kind` is a [`FailureKind`](crate::errors::FailureKind); it is logged
/// as `err.kind` together with its stable `err.code`.
///
/// # Example
///
/// ```
/// # use verity_core::log_op_failure;
/// use verity_core::errors::FailureKind;
///
/// log_op_failure!("equal", FailureKind::AssertionMismatch);
/// log_op_failure!("len", FailureKind::LengthUndefined, trace_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_failure {
    ($op:expr, $kind:expr) => {{
        let kind: $crate::errors::FailureKind = $kind;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_FAILURE,
            err.kind = ?kind,
            err.code = kind.code(),
        );
    }};
    ($op:expr, $kind:expr, $($field:tt)*) => {{
        let kind: $crate::errors::FailureKind = $kind;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_FAILURE,
            err.kind = ?kind,
            err.code = kind.code(),
            $($field)*
        );
    }};
}

/// Log a check that held
///
/// # Example
///
/// ```
/// # use verity_core::log_op_pass;
/// log_op_pass!("equal");
/// ```
#[macro_export]
macro_rules! log_op_pass {
    ($op:expr) => {
        tracing::trace!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_PASS,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::trace!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_PASS,
            $($field)*
        );
    };
}
