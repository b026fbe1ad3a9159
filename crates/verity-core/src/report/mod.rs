//! Failure reporter
//!
//! Turns a failed check into the report text handed to a [`FailureSink`]:
//!
//! - optional `file:line:column` preamble (see [`ReporterConfig`])
//! - `Error Trace:` with the frames from the [`Tracer`]
//! - `Error:` with the headline and, when present, the structural diff
//! - optional `Messages:` with the caller's [`Message`]
//!
//! Reporting always yields `false` so assertion wrappers can return it
//! directly.

pub mod format;
pub mod message;
pub mod sink;

pub use format::{format_report, indent_message_lines};
pub use message::{sprintf, Message};
pub use sink::{Configured, FailureSink, RecordingSink, SoftFailSink};

use crate::errors::{EqualityError, FailureKind};
use crate::trace::{TraceFilter, Tracer};
use std::panic::Location;
use verity_core_types::schema::ENV_PRINT_LOCATION;
use verity_core_types::CallFrame;

/// Reporter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReporterConfig {
    /// Prefix reports with the full `file:line:column` of the assertion
    pub print_location: bool,
}

impl ReporterConfig {
    /// Read options from the environment.
    ///
    /// `VERITY_PRINT_LOCATION=1` enables `print_location`; any other value,
    /// or no value, leaves it off.
    pub fn from_env() -> Self {
        Self {
            print_location: std::env::var(ENV_PRINT_LOCATION).is_ok_and(|v| v == "1"),
        }
    }
}

/// What went wrong in one check
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// Name of the check that failed
    pub op: &'static str,
    pub kind: FailureKind,
    pub headline: String,
    pub diff: Option<String>,
}

impl Failure {
    pub fn new(op: &'static str, headline: impl Into<String>) -> Self {
        Self {
            op,
            kind: FailureKind::AssertionMismatch,
            headline: headline.into(),
            diff: None,
        }
    }

    /// Failure carrying the message and kind of `err`
    pub fn from_error(op: &'static str, err: &EqualityError) -> Self {
        Self::new(op, err.to_string()).with_kind(err.kind())
    }

    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach a diff; an empty diff is dropped
    pub fn with_diff(mut self, diff: String) -> Self {
        self.diff = if diff.is_empty() { None } else { Some(diff) };
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: ReporterConfig,
    tracer: Tracer,
}

impl Reporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            config,
            tracer: Tracer::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ReporterConfig::from_env())
    }

    pub fn with_filter(mut self, filter: TraceFilter) -> Self {
        self.tracer = Tracer::new(filter);
        self
    }

    pub fn config(&self) -> ReporterConfig {
        self.config
    }

    /// Report `failure` to `sink`, tracing from the caller.
    ///
    /// Delivers exactly one report and returns `false`.
    #[track_caller]
    pub fn fail<S: FailureSink + ?Sized>(
        &self,
        sink: &mut S,
        failure: &Failure,
        message: &Message,
    ) -> bool {
        self.fail_at(sink, failure, message, Location::caller())
    }

    /// [`fail`](Self::fail) with an explicit assertion location
    pub fn fail_at<S: FailureSink + ?Sized>(
        &self,
        sink: &mut S,
        failure: &Failure,
        message: &Message,
        origin: &Location<'_>,
    ) -> bool {
        let trace = self.tracer.capture(origin);
        let location = self.config.print_location.then(|| CallFrame::from(origin));
        let report = format_report(
            location.as_ref(),
            &trace,
            &failure.headline,
            failure.diff.as_deref(),
            &message.render(),
        );

        crate::log_op_failure!(
            failure.op,
            failure.kind,
            trace_len = trace.len(),
            has_diff = failure.diff.is_some()
        );

        sink.record_failure(&report);
        false
    }
}

/// Report an unconditional failure with the sink's own reporter.
///
/// Always returns `false`.
#[track_caller]
pub fn report_failure<S: FailureSink + ?Sized>(
    sink: &mut S,
    headline: impl Into<String>,
    message: impl Into<Message>,
) -> bool {
    let reporter = sink.reporter();
    reporter.fail(sink, &Failure::new("fail", headline), &message.into())
}
