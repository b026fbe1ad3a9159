//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the logging macros,
//! the reporter, and tests that inspect captured events.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Failure fields
pub const FIELD_TRACE_LEN: &str = "trace_len";
pub const FIELD_HAS_DIFF: &str = "has_diff";
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_PASS: &str = "pass";
pub const EVENT_FAILURE: &str = "failure";
pub const EVENT_TRACE_UNAVAILABLE: &str = "trace_unavailable";

/// Environment variable that enables the `file:line:column` preamble
pub const ENV_PRINT_LOCATION: &str = "VERITY_PRINT_LOCATION";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_FAILURE.is_empty());
        assert!(!ENV_PRINT_LOCATION.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_PASS, EVENT_FAILURE);
        assert_ne!(EVENT_FAILURE, EVENT_TRACE_UNAVAILABLE);
    }
}
