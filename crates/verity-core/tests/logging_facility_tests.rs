#![allow(clippy::unwrap_used, clippy::expect_used)]

use tracing::Level;
use verity_core::assertions::{equal, is_true};
use verity_core::errors::FailureKind;
use verity_core::logging_facility::test_capture::init_test_capture;
use verity_core::report::RecordingSink;
use verity_core::types::schema::{EVENT_FAILURE, EVENT_PASS, FIELD_ERR_KIND, FIELD_TRACE_LEN};
use verity_core::{log_op_failure, log_op_pass};

#[test]
fn test_log_op_failure_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_failure_unique_1";

    log_op_failure!(op_name, FailureKind::AssertionMismatch);

    let events = capture.find(op_name, EVENT_FAILURE);
    assert_eq!(events.len(), 1, "Should have exactly one failure event");
    assert_eq!(events[0].level, Level::WARN);
    assert_eq!(events[0].err_code(), Some("ERR_ASSERTION_MISMATCH"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("AssertionMismatch"));
}

#[test]
fn test_log_op_failure_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_failure_fields_unique_2";

    log_op_failure!(op_name, FailureKind::LengthUndefined, trace_len = 3);

    let events = capture.find(op_name, EVENT_FAILURE);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field(FIELD_TRACE_LEN), Some("3"));
    assert_eq!(events[0].err_code(), Some("ERR_LENGTH_UNDEFINED"));
}

#[test]
fn test_log_op_pass_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_pass_unique_3";

    log_op_pass!(op_name);
    log_op_pass!(op_name, detail = "held");

    let events = capture.find(op_name, EVENT_PASS);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.level == Level::TRACE));
    assert_eq!(events[1].field("detail"), Some("held"));
}

#[test]
fn test_component_is_calling_module() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_4";

    log_op_pass!(op_name);

    let events = capture.find(op_name, EVENT_PASS);
    assert_eq!(
        events[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}

#[test]
fn test_assertions_log_pass_and_failure() {
    let capture = init_test_capture();
    let mut t = RecordingSink::new();

    assert!(is_true(&mut t, true, ()));
    assert!(!equal(&mut t, &1, &2, ()));

    assert!(!capture.find("is_true", EVENT_PASS).is_empty());
    let failures = capture.find("equal", EVENT_FAILURE);
    assert!(failures
        .iter()
        .any(|e| e.err_code() == Some("ERR_ASSERTION_MISMATCH")));
}

#[test]
fn test_test_capture_assert_event_exists() {
    let capture = init_test_capture();
    let op_name = "test_capture_assert_unique_5";

    log_op_failure!(op_name, FailureKind::ParseFailure);

    capture.assert_event_exists(op_name, EVENT_FAILURE);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_FAILURE);
}

#[test]
fn test_test_capture_count_events() {
    let capture = init_test_capture();
    let op1_name = "test_count_events_op1_unique_6";
    let op2_name = "test_count_events_op2_unique_6";

    log_op_failure!(op1_name, FailureKind::TypeMismatch);
    log_op_failure!(op2_name, FailureKind::TypeMismatch);
    log_op_pass!(op1_name);

    let failures = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_FAILURE)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });
    let passes = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_PASS) && e.op.as_deref() == Some(op1_name)
    });

    assert_eq!(failures, 2);
    assert_eq!(passes, 1);
}
