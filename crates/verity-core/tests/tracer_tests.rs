#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::panic::Location;
use verity_core::trace::{is_test_entry, parse_backtrace, TraceFilter, Tracer};
use verity_core::types::{CallFrame, CallTrace};

const BACKTRACE: &str = "   0: std::backtrace_rs::backtrace::libunwind::trace
             at /rustc/0000/library/std/src/../../backtrace/src/backtrace/libunwind.rs:116:5
   1: std::backtrace::Backtrace::force_capture
             at /rustc/0000/library/std/src/backtrace.rs:312:9
   2: verity_core::trace::Tracer::capture
             at ./src/trace/mod.rs:44:25
   3: verity_core::report::Reporter::fail_at
             at ./src/report/mod.rs:132:21
   4: verity_core::assertions::equal
             at ./src/assertions.rs:101:5
   5: checkout_tests::helpers::assert_total
             at ./tests/helpers.rs:14:5
   6: checkout_tests::test_total_with_discount
             at ./tests/checkout_tests.rs:31:5
   7: checkout_tests::test_total_with_discount::{{closure}}
             at ./tests/checkout_tests.rs:29:30
   8: <checkout_tests::test_total_with_discount::{{closure}} as core::ops::function::FnOnce<()>>::call_once
             at /rustc/0000/library/core/src/ops/function.rs:250:5
   9: test::__rust_begin_short_backtrace::<core::result::Result<(), alloc::string::String>, fn() -> core::result::Result<(), alloc::string::String>>
             at /rustc/0000/library/test/src/lib.rs:663:18
  10: test::run_test_in_process::{{closure}}
             at /rustc/0000/library/test/src/lib.rs:686:18
";

#[test]
fn test_walk_keeps_user_frames_up_to_test_entry() {
    let frames = parse_backtrace(BACKTRACE);
    assert_eq!(frames.len(), 11);

    let kept = Tracer::default().walk(&frames);
    let rendered: Vec<String> = kept.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["helpers.rs:14", "checkout_tests.rs:31"]);
    assert_eq!(kept[1].column, Some(5));
}

#[test]
fn test_walk_without_entry_stops_at_runner_dispatch() {
    let text = BACKTRACE.replace("test_total_with_discount", "total_with_discount");
    let kept = Tracer::default().walk(&parse_backtrace(&text));
    let rendered: Vec<String> = kept.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["helpers.rs:14", "checkout_tests.rs:31", "checkout_tests.rs:29"]
    );
}

#[test]
fn test_unknown_frame_ends_walk() {
    let text = "   0: app::check\n             at ./tests/app.rs:3:1\n   1: <unknown>\n   2: app::test_it\n             at ./tests/app.rs:9:1\n";
    let kept = Tracer::default().walk(&parse_backtrace(text));
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_resolve_prepends_assertion_site() {
    let origin = CallFrame::new("crates/shop/tests/helpers.rs", 14).with_column(5);
    let trace = Tracer::default().resolve(&parse_backtrace(BACKTRACE), origin.clone());
    assert_eq!(trace.len(), 2);

    let elsewhere = CallFrame::new("crates/shop/tests/other.rs", 2);
    let trace = Tracer::default().resolve(&parse_backtrace(BACKTRACE), elsewhere.clone());
    assert_eq!(trace.len(), 3);
    assert_eq!(trace.first(), Some(&elsewhere));
}

#[test]
fn test_custom_filter_hides_helper_crate() {
    let mut filter = TraceFilter::default();
    filter
        .library_prefixes
        .push("checkout_tests::helpers::".to_string());
    let kept = Tracer::new(filter).walk(&parse_backtrace(BACKTRACE));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].file_name(), "checkout_tests.rs");
}

#[test]
fn test_entry_prefixes() {
    assert!(is_test_entry("TestCheckout", "Test"));
    assert!(is_test_entry("Example", "Example"));
    assert!(!is_test_entry("Examples", "Example"));
    assert!(is_test_entry("bench_sort", "bench"));
}

#[test]
fn test_live_capture_contains_origin_and_no_library_frames() {
    let origin = Location::caller();
    let trace = Tracer::default().capture(origin);
    assert!(trace.contains_line(&CallFrame::from(origin)));
    for frame in trace.frames() {
        assert!(!frame.file.contains("src/trace"), "library frame kept: {frame:?}");
    }
}

fn capture_in_helper() -> CallTrace {
    capture_in_nested_helper()
}

fn capture_in_nested_helper() -> CallTrace {
    Tracer::default().capture(Location::caller())
}

#[test]
fn live_capture_outside_test_prefix_stops_at_runner() {
    let trace = capture_in_helper();
    assert!(!trace.is_empty());
    for frame in trace.frames() {
        assert!(!frame.file.contains("/rustc/"), "toolchain frame kept: {frame:?}");
        assert!(!frame.file.contains("rustlib"), "toolchain frame kept: {frame:?}");
        assert_eq!(frame.file_name(), "tracer_tests.rs", "foreign frame kept: {frame:?}");
    }
}
