//! Call-site tracer.
//!
//! Recovers the chain of user-code frames between a failing assertion and
//! the test function that ran it. The walk is driven by a captured
//! [`Backtrace`](std::backtrace::Backtrace) and anchored by the
//! `#[track_caller]` location of the assertion, which is used on its own
//! whenever the backtrace has nothing better to offer.

pub mod filter;
pub mod parse;

pub use filter::{is_test_entry, symbol_path, TraceFilter};
pub use parse::{parse_backtrace, RawFrame};

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;
use verity_core_types::schema::EVENT_TRACE_UNAVAILABLE;
use verity_core_types::{CallFrame, CallTrace};

/// Runtime symbol that dispatches each test; nothing above it is user code
const RUNNER_DISPATCH: &str = "__rust_begin_short_backtrace";

#[derive(Debug, Clone, Default)]
pub struct Tracer {
    filter: TraceFilter,
}

impl Tracer {
    pub fn new(filter: TraceFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &TraceFilter {
        &self.filter
    }

    /// Capture the trace of the current call stack.
    ///
    /// Never fails: when no backtrace can be taken the result is the single
    /// `origin` frame.
    pub fn capture(&self, origin: &Location<'_>) -> CallTrace {
        let origin = CallFrame::from(origin);
        let backtrace = Backtrace::force_capture();
        if backtrace.status() != BacktraceStatus::Captured {
            tracing::debug!(
                event = EVENT_TRACE_UNAVAILABLE,
                status = ?backtrace.status(),
                "Backtrace unavailable, using assertion location"
            );
            return CallTrace::new(vec![origin]);
        }
        self.resolve(&parse_backtrace(&backtrace.to_string()), origin)
    }

    /// Turn parsed frames into a trace anchored at `origin`.
    ///
    /// `origin` is prepended unless the walk already reached its line. An
    /// empty walk yields `origin` alone.
    pub fn resolve(&self, frames: &[RawFrame], origin: CallFrame) -> CallTrace {
        let mut trace: CallTrace = self.walk(frames).into_iter().collect();
        if trace.is_empty() {
            tracing::debug!(
                event = EVENT_TRACE_UNAVAILABLE,
                frames = frames.len(),
                "No caller frames found, using assertion location"
            );
            return CallTrace::new(vec![origin]);
        }
        if !trace.contains_line(&origin) {
            trace.push_front(origin);
        }
        trace
    }

    /// Walk frames innermost first, keeping user frames.
    ///
    /// Stops at an unresolved symbol, at the runner dispatch symbol, or
    /// after the first test-entry frame (which is kept).
    pub fn walk(&self, frames: &[RawFrame]) -> Vec<CallFrame> {
        let mut kept = Vec::new();
        for raw in frames {
            let Some(function) = raw.function.as_deref() else {
                break;
            };
            if symbol_path(function).ends_with(RUNNER_DISPATCH) {
                break;
            }

            if let (Some(file), Some(line)) = (raw.file.as_deref(), raw.line) {
                let mut frame = CallFrame::new(file, line).with_function(function);
                if let Some(column) = raw.column {
                    frame = frame.with_column(column);
                }
                let internal =
                    self.filter.is_internal(function) || self.filter.is_runtime_file(file);
                if self.filter.is_boundary(frame.file_name()) || !internal {
                    kept.push(frame);
                }
            }

            if self.filter.is_test_entry(function) {
                break;
            }
        }
        kept
    }
}
