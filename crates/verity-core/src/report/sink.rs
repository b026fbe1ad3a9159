//! Failure sinks: where finished reports go

use crate::report::{Reporter, ReporterConfig};
use crate::trace::TraceFilter;

/// Receiver of failure reports, usually the test runner
pub trait FailureSink {
    /// Record one finished report
    fn record_failure(&mut self, report: &str);

    /// Reporter used for failures delivered to this sink.
    ///
    /// Defaults to [`Reporter::from_env`], read each time a failure is
    /// reported.
    fn reporter(&self) -> Reporter {
        Reporter::from_env()
    }
}

impl<S: FailureSink + ?Sized> FailureSink for &mut S {
    fn record_failure(&mut self, report: &str) {
        (**self).record_failure(report);
    }

    fn reporter(&self) -> Reporter {
        (**self).reporter()
    }
}

/// Collects reports in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    reports: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    pub fn last(&self) -> Option<&str> {
        self.reports.last().map(String::as_str)
    }

    pub fn failed(&self) -> bool {
        !self.reports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl FailureSink for RecordingSink {
    fn record_failure(&mut self, report: &str) {
        self.reports.push(report.to_string());
    }
}

/// Prints each report to stderr and fails the test when dropped.
///
/// Lets a test keep running after a failed check and still fail at the
/// end, with every report printed.
///
/// # Panics
///
/// On drop, if any failure was recorded and the thread is not already
/// panicking.
#[derive(Debug, Default)]
pub struct SoftFailSink {
    failures: usize,
}

impl SoftFailSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl FailureSink for SoftFailSink {
    fn record_failure(&mut self, report: &str) {
        self.failures += 1;
        eprintln!("{}", report);
    }
}

impl Drop for SoftFailSink {
    fn drop(&mut self) {
        if self.failures > 0 && !std::thread::panicking() {
            panic!("{} assertion(s) failed", self.failures);
        }
    }
}

/// Wraps a sink with an explicit reporter configuration that takes
/// precedence over the environment
#[derive(Debug)]
pub struct Configured<S> {
    inner: S,
    reporter: Reporter,
}

impl<S: FailureSink> Configured<S> {
    pub fn new(inner: S, config: ReporterConfig) -> Self {
        Self {
            inner,
            reporter: Reporter::new(config),
        }
    }

    pub fn with_filter(mut self, filter: TraceFilter) -> Self {
        self.reporter = self.reporter.with_filter(filter);
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FailureSink> FailureSink for Configured<S> {
    fn record_failure(&mut self, report: &str) {
        self.inner.record_failure(report);
    }

    fn reporter(&self) -> Reporter {
        self.reporter.clone()
    }
}
