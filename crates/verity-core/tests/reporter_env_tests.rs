#![allow(clippy::unwrap_used, clippy::expect_used)]

use verity_core::assertions::is_true;
use verity_core::report::{RecordingSink, ReporterConfig};
use verity_core::types::schema::ENV_PRINT_LOCATION;

// Kept as the only test in this binary: it mutates the process environment.
#[test]
fn test_env_flag_is_read_at_failure_time() {
    std::env::remove_var(ENV_PRINT_LOCATION);
    assert!(!ReporterConfig::from_env().print_location);

    let mut sink = RecordingSink::new();
    is_true(&mut sink, false, ());
    assert!(sink.reports()[0].starts_with("\tError Trace:"));

    std::env::set_var(ENV_PRINT_LOCATION, "1");
    is_true(&mut sink, false, ());
    assert!(sink.reports()[1].starts_with("crates/verity-core/tests/reporter_env_tests.rs:")
        || sink.reports()[1].starts_with("tests/reporter_env_tests.rs:"));

    std::env::set_var(ENV_PRINT_LOCATION, "true");
    assert!(!ReporterConfig::from_env().print_location);
    std::env::remove_var(ENV_PRINT_LOCATION);
}
