//! Verity Core - value comparison and failure reporting for tests
//!
//! This crate provides:
//! - An equality engine over the closed [`Value`](verity_core_types::Value)
//!   model: strict, value (lossless coercion), exact, delta, epsilon,
//!   containment, emptiness and zero checks
//! - A call-site tracer that recovers the frames between a failing check
//!   and the test that ran it
//! - A structural differ producing unified diffs of composite values
//! - A failure reporter that formats reports and hands them to a
//!   [`FailureSink`](report::FailureSink)
//! - Assertion functions built on all of the above
//!
//! Nothing here panics on a failed check. Reports go to the sink, and the
//! sink decides what a failure means for the running test.

pub mod assertions;
pub mod diff;
pub mod equality;
pub mod errors;
pub mod logging_facility;
pub mod report;
pub mod trace;

pub use verity_core_types as types;

// Re-export commonly used types
pub use assertions::{did_panic, PanicOutcome};
pub use errors::{EqualityError, FailureKind, Result};
pub use report::{
    report_failure, Configured, Failure, FailureSink, Message, RecordingSink, Reporter,
    ReporterConfig, SoftFailSink,
};
pub use trace::{TraceFilter, Tracer};
