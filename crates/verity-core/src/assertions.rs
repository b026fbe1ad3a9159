//! Assertion functions
//!
//! Each assertion checks one condition, reports a failure to the sink when
//! it does not hold, and returns whether it held. None of them panic;
//! whether a failure stops the test is up to the sink.
//!
//! ```
//! use verity_core::assertions::{equal, len};
//! use verity_core::msg;
//! use verity_core::report::RecordingSink;
//!
//! let mut t = RecordingSink::new();
//! assert!(equal(&mut t, &123, &123, "123 and 123 should be equal"));
//! assert!(!len(&mut t, &vec![1, 2], 3, msg!("size of %s", "list")));
//! assert_eq!(t.len(), 1);
//! ```

use crate::diff::diff;
use crate::equality::{
    check_exact, contains as contains_value, delta_equal, delta_equal_sequence, epsilon_equal,
    epsilon_equal_sequence, is_empty, is_nil, is_zero, length, strict_equal, value_equal,
};
use crate::errors::{EqualityError, FailureKind};
use crate::report::{Failure, FailureSink, Message};
use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use verity_core_types::{Reflect, Value};

/// How a closure run under [`did_panic`] ended
pub enum PanicOutcome {
    Completed,
    Aborted(Box<dyn Any + Send>),
}

impl PanicOutcome {
    pub fn panicked(&self) -> bool {
        matches!(self, PanicOutcome::Aborted(_))
    }

    /// Panic message, when the payload is a string
    pub fn message(&self) -> Option<&str> {
        match self {
            PanicOutcome::Completed => None,
            PanicOutcome::Aborted(payload) => payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str)),
        }
    }
}

impl fmt::Debug for PanicOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanicOutcome::Completed => write!(f, "Completed"),
            PanicOutcome::Aborted(_) => write!(f, "Aborted({:?})", self.message()),
        }
    }
}

/// Run `f`, capturing a panic instead of unwinding further
pub fn did_panic<F: FnOnce()>(f: F) -> PanicOutcome {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => PanicOutcome::Completed,
        Err(payload) => PanicOutcome::Aborted(payload),
    }
}

#[track_caller]
fn report<S: FailureSink + ?Sized>(t: &mut S, failure: Failure, msg: Message) -> bool {
    let reporter = t.reporter();
    reporter.fail(t, &failure, &msg)
}

fn pass(op: &'static str) -> bool {
    crate::log_op_pass!(op);
    true
}

fn not_equal_headline(expected: &Value, actual: &Value) -> String {
    format!(
        "Not equal: {} (expected)\n        != {} (actual)",
        expected.typed(),
        actual.typed()
    )
}

/// Report a failure unconditionally
#[track_caller]
pub fn fail<S: FailureSink + ?Sized>(
    t: &mut S,
    failure_message: impl Into<String>,
    msg: impl Into<Message>,
) -> bool {
    report(t, Failure::new("fail", failure_message), msg.into())
}

/// `expected` and `actual` are deeply equal with identical types.
///
/// Composite values get a structural diff in the report.
#[track_caller]
pub fn equal<S, E, A>(t: &mut S, expected: &E, actual: &A, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let (e, a) = (expected.reflect(), actual.reflect());
    if strict_equal(&e, &a) {
        return pass("equal");
    }
    let failure = Failure::new("equal", not_equal_headline(&e, &a)).with_diff(diff(&e, &a));
    report(t, failure, msg.into())
}

#[track_caller]
pub fn not_equal<S, E, A>(t: &mut S, expected: &E, actual: &A, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let (e, a) = (expected.reflect(), actual.reflect());
    if !strict_equal(&e, &a) {
        return pass("not_equal");
    }
    let failure = Failure::new("not_equal", format!("Should not be: {}", a.typed()));
    report(t, failure, msg.into())
}

/// Equal, or `expected` converts losslessly to `actual`'s type and is then
/// equal
#[track_caller]
pub fn equal_values<S, E, A>(t: &mut S, expected: &E, actual: &A, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let (e, a) = (expected.reflect(), actual.reflect());
    if value_equal(&e, &a) {
        return pass("equal_values");
    }
    report(
        t,
        Failure::new("equal_values", not_equal_headline(&e, &a)),
        msg.into(),
    )
}

/// Same type and equal
#[track_caller]
pub fn exactly<S, E, A>(t: &mut S, expected: &E, actual: &A, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    if let Err(err) = check_exact(&expected.reflect(), &actual.reflect()) {
        return report(t, Failure::from_error("exactly", &err), msg.into());
    }
    equal(t, expected, actual, msg)
}

/// `object` has the same type as `expected_type`
#[track_caller]
pub fn is_type<S, E, A>(t: &mut S, expected_type: &E, object: &A, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let (e, a) = (expected_type.reflect(), object.reflect());
    if e.type_desc() == a.type_desc() {
        return pass("is_type");
    }
    let headline = format!(
        "Object expected to be of type {}, but was {}",
        e.type_name(),
        a.type_name()
    );
    report(
        t,
        Failure::new("is_type", headline).with_kind(FailureKind::TypeMismatch),
        msg.into(),
    )
}

/// Nil sentinel, null pointer or nil channel
#[track_caller]
pub fn nil<S, V>(t: &mut S, object: &V, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    V: Reflect + ?Sized,
{
    let v = object.reflect();
    if is_nil(&v) {
        return pass("nil");
    }
    report(
        t,
        Failure::new("nil", format!("Expected nil, but got: {}", v.typed())),
        msg.into(),
    )
}

#[track_caller]
pub fn not_nil<S, V>(t: &mut S, object: &V, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    V: Reflect + ?Sized,
{
    if !is_nil(&object.reflect()) {
        return pass("not_nil");
    }
    report(
        t,
        Failure::new("not_nil", "Expected value not to be nil."),
        msg.into(),
    )
}

/// `object` is nil, `""`, `false`, zero, or has no elements
#[track_caller]
pub fn empty<S, V>(t: &mut S, object: &V, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    V: Reflect + ?Sized,
{
    let v = object.reflect();
    if is_empty(&v) {
        return pass("empty");
    }
    report(
        t,
        Failure::new("empty", format!("Should be empty, but was {}", v)),
        msg.into(),
    )
}

#[track_caller]
pub fn not_empty<S, V>(t: &mut S, object: &V, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    V: Reflect + ?Sized,
{
    let v = object.reflect();
    if !is_empty(&v) {
        return pass("not_empty");
    }
    report(
        t,
        Failure::new("not_empty", format!("Should NOT be empty, but was {}", v)),
        msg.into(),
    )
}

/// `object` has exactly `expected_len` elements (bytes for strings).
///
/// Fails when `object` has no length at all.
#[track_caller]
pub fn len<S, V>(t: &mut S, object: &V, expected_len: usize, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    V: Reflect + ?Sized,
{
    let v = object.reflect();
    match length(&v) {
        Err(err) => report(t, Failure::from_error("len", &err), msg.into()),
        Ok(actual_len) if actual_len == expected_len => pass("len"),
        Ok(actual_len) => {
            let headline = format!(
                "\"{}\" should have {} item(s), but has {}",
                v, expected_len, actual_len
            );
            report(t, Failure::new("len", headline), msg.into())
        }
    }
}

#[track_caller]
pub fn is_true<S: FailureSink + ?Sized>(t: &mut S, value: bool, msg: impl Into<Message>) -> bool {
    if value {
        return pass("is_true");
    }
    report(t, Failure::new("is_true", "Should be true"), msg.into())
}

#[track_caller]
pub fn is_false<S: FailureSink + ?Sized>(t: &mut S, value: bool, msg: impl Into<Message>) -> bool {
    if !value {
        return pass("is_false");
    }
    report(t, Failure::new("is_false", "Should be false"), msg.into())
}

/// Substring, sequence element, or mapping key
#[track_caller]
pub fn contains<S, C, E>(t: &mut S, container: &C, element: &E, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    C: Reflect + ?Sized,
    E: Reflect + ?Sized,
{
    let (c, e) = (container.reflect(), element.reflect());
    match contains_value(&c, &e) {
        Err(err) => report(t, Failure::from_error("contains", &err), msg.into()),
        Ok(true) => pass("contains"),
        Ok(false) => report(
            t,
            Failure::new("contains", format!("\"{}\" does not contain \"{}\"", c, e)),
            msg.into(),
        ),
    }
}

#[track_caller]
pub fn not_contains<S, C, E>(t: &mut S, container: &C, element: &E, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    C: Reflect + ?Sized,
    E: Reflect + ?Sized,
{
    let (c, e) = (container.reflect(), element.reflect());
    match contains_value(&c, &e) {
        Err(err) => report(t, Failure::from_error("not_contains", &err), msg.into()),
        Ok(false) => pass("not_contains"),
        Ok(true) => report(
            t,
            Failure::new(
                "not_contains",
                format!("\"{}\" should not contain \"{}\"", c, e),
            ),
            msg.into(),
        ),
    }
}

/// `comparison` returns true
#[track_caller]
pub fn condition<S, F>(t: &mut S, comparison: F, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    F: FnOnce() -> bool,
{
    if comparison() {
        return pass("condition");
    }
    report(t, Failure::new("condition", "Condition failed!"), msg.into())
}

/// `f` panics
#[track_caller]
pub fn panics<S, F>(t: &mut S, f: F, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    F: FnOnce(),
{
    if did_panic(f).panicked() {
        return pass("panics");
    }
    report(
        t,
        Failure::new("panics", "func should panic\n\tPanic value:\t<nil>"),
        msg.into(),
    )
}

/// `f` returns normally
#[track_caller]
pub fn not_panics<S, F>(t: &mut S, f: F, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    F: FnOnce(),
{
    let outcome = did_panic(f);
    if !outcome.panicked() {
        return pass("not_panics");
    }
    let headline = format!(
        "func should not panic\n\tPanic value:\t{}",
        outcome.message().unwrap_or("<non-string payload>")
    );
    report(t, Failure::new("not_panics", headline), msg.into())
}

/// `expected` and `actual` are at most `delta` apart
#[track_caller]
pub fn within_duration<S: FailureSink + ?Sized>(
    t: &mut S,
    expected: DateTime<Utc>,
    actual: DateTime<Utc>,
    delta: TimeDelta,
    msg: impl Into<Message>,
) -> bool {
    let dt = expected - actual;
    if dt >= -delta && dt <= delta {
        return pass("within_duration");
    }
    let headline = format!(
        "Max difference between {} and {} allowed is {}, but difference was {}",
        expected, actual, delta, dt
    );
    report(t, Failure::new("within_duration", headline), msg.into())
}

#[track_caller]
fn closeness<S: FailureSink + ?Sized>(
    t: &mut S,
    op: &'static str,
    result: Result<(), EqualityError>,
    msg: Message,
) -> bool {
    match result {
        Ok(()) => pass(op),
        Err(err) => report(t, Failure::from_error(op, &err), msg),
    }
}

/// Two numbers within `delta` of each other
#[track_caller]
pub fn in_delta<S, E, A>(
    t: &mut S,
    expected: &E,
    actual: &A,
    delta: f64,
    msg: impl Into<Message>,
) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let result = delta_equal(&expected.reflect(), &actual.reflect(), delta);
    closeness(t, "in_delta", result, msg.into())
}

/// [`in_delta`] for each index of two sequences of the same length
#[track_caller]
pub fn in_delta_slice<S, E, A>(
    t: &mut S,
    expected: &E,
    actual: &A,
    delta: f64,
    msg: impl Into<Message>,
) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let result = delta_equal_sequence(&expected.reflect(), &actual.reflect(), delta);
    closeness(t, "in_delta_slice", result, msg.into())
}

/// Two numbers within relative error `epsilon`
#[track_caller]
pub fn in_epsilon<S, E, A>(
    t: &mut S,
    expected: &E,
    actual: &A,
    epsilon: f64,
    msg: impl Into<Message>,
) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let result = epsilon_equal(&expected.reflect(), &actual.reflect(), epsilon);
    closeness(t, "in_epsilon", result, msg.into())
}

#[track_caller]
pub fn in_epsilon_slice<S, E, A>(
    t: &mut S,
    expected: &E,
    actual: &A,
    epsilon: f64,
    msg: impl Into<Message>,
) -> bool
where
    S: FailureSink + ?Sized,
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    let result = epsilon_equal_sequence(&expected.reflect(), &actual.reflect(), epsilon);
    closeness(t, "in_epsilon_slice", result, msg.into())
}

/// `result` is `Ok`
#[track_caller]
pub fn no_error<S, T, E>(t: &mut S, result: &Result<T, E>, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    E: fmt::Display,
{
    match result {
        Ok(_) => pass("no_error"),
        Err(err) => report(
            t,
            Failure::new(
                "no_error",
                format!("Received unexpected error {:?}", err.to_string()),
            ),
            msg.into(),
        ),
    }
}

/// `result` is `Err`
#[track_caller]
pub fn error<S, T, E>(t: &mut S, result: &Result<T, E>, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
{
    match result {
        Err(_) => pass("error"),
        Ok(_) => report(
            t,
            Failure::new("error", "An error is expected but got Ok."),
            msg.into(),
        ),
    }
}

/// `result` is `Err` and its message is exactly `expected_message`
#[track_caller]
pub fn equal_error<S, T, E>(
    t: &mut S,
    result: &Result<T, E>,
    expected_message: &str,
    msg: impl Into<Message>,
) -> bool
where
    S: FailureSink + ?Sized,
    E: fmt::Display,
{
    let actual_message = match result {
        Ok(_) => {
            return report(
                t,
                Failure::new("equal_error", "An error is expected but got Ok."),
                msg.into(),
            )
        }
        Err(err) => err.to_string(),
    };
    if actual_message == expected_message {
        return pass("equal_error");
    }
    let headline = format!(
        "Error message not equal:\nexpected: {:?}\nactual  : {:?}",
        expected_message, actual_message
    );
    report(t, Failure::new("equal_error", headline), msg.into())
}

fn compile(pattern: &str) -> Result<Regex, EqualityError> {
    Regex::new(pattern).map_err(|err| EqualityError::Parse {
        subject: "Pattern".to_string(),
        format: "regex".to_string(),
        input: pattern.to_string(),
        reason: err.to_string(),
    })
}

/// `pattern` matches somewhere in `text`
#[track_caller]
pub fn regexp<S, D>(t: &mut S, pattern: &str, text: D, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    D: fmt::Display,
{
    let re = match compile(pattern) {
        Ok(re) => re,
        Err(err) => return report(t, Failure::from_error("regexp", &err), msg.into()),
    };
    let text = text.to_string();
    if re.is_match(&text) {
        return pass("regexp");
    }
    report(
        t,
        Failure::new(
            "regexp",
            format!("Expect \"{}\" to match \"{}\"", text, pattern),
        ),
        msg.into(),
    )
}

#[track_caller]
pub fn not_regexp<S, D>(t: &mut S, pattern: &str, text: D, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    D: fmt::Display,
{
    let re = match compile(pattern) {
        Ok(re) => re,
        Err(err) => return report(t, Failure::from_error("not_regexp", &err), msg.into()),
    };
    let text = text.to_string();
    if !re.is_match(&text) {
        return pass("not_regexp");
    }
    report(
        t,
        Failure::new(
            "not_regexp",
            format!("Expect \"{}\" to NOT match \"{}\"", text, pattern),
        ),
        msg.into(),
    )
}

/// `object` is the default value of its type
#[track_caller]
pub fn zero<S, V>(t: &mut S, object: &V, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    V: Reflect + ?Sized,
{
    let v = object.reflect();
    if is_zero(&v) {
        return pass("zero");
    }
    report(
        t,
        Failure::new("zero", format!("Should be zero, but was {}", v)),
        msg.into(),
    )
}

#[track_caller]
pub fn not_zero<S, V>(t: &mut S, object: &V, msg: impl Into<Message>) -> bool
where
    S: FailureSink + ?Sized,
    V: Reflect + ?Sized,
{
    let v = object.reflect();
    if !is_zero(&v) {
        return pass("not_zero");
    }
    report(
        t,
        Failure::new("not_zero", format!("Should not be zero, but was {}", v)),
        msg.into(),
    )
}

fn parse_json(subject: &str, input: &str) -> Result<serde_json::Value, EqualityError> {
    serde_json::from_str(input).map_err(|err| EqualityError::Parse {
        subject: subject.to_string(),
        format: "JSON".to_string(),
        input: input.to_string(),
        reason: err.to_string(),
    })
}

/// Two JSON documents are equivalent, ignoring object key order and
/// formatting
#[track_caller]
pub fn json_eq<S: FailureSink + ?Sized>(
    t: &mut S,
    expected: &str,
    actual: &str,
    msg: impl Into<Message>,
) -> bool {
    let parsed = parse_json("Expected value", expected)
        .and_then(|e| parse_json("Input", actual).map(|a| (e, a)));
    match parsed {
        Ok((e, a)) => equal(t, &e, &a, msg),
        Err(err) => report(t, Failure::from_error("json_eq", &err), msg.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingSink;

    #[test]
    fn test_did_panic_captures_payload() {
        let outcome = did_panic(|| panic!("boom"));
        assert!(outcome.panicked());
        assert_eq!(outcome.message(), Some("boom"));

        let outcome = did_panic(|| panic!("{}-{}", "a", 1));
        assert_eq!(outcome.message(), Some("a-1"));

        assert!(!did_panic(|| {}).panicked());
    }

    #[test]
    fn test_equal_attaches_diff_for_composites() {
        let mut t = RecordingSink::new();
        assert!(!equal(&mut t, &vec![1, 2], &vec![1, 3], ()));
        let report = t.last().unwrap_or_default();
        assert!(report.contains("Not equal: Vec<i32>[1, 2] (expected)"));
        assert!(report.contains("\tDiff:\n\t--- Expected\n\t+++ Actual\n"));
    }

    #[test]
    fn test_equal_scalar_has_no_diff() {
        let mut t = RecordingSink::new();
        assert!(!equal(&mut t, &1, &2, ()));
        assert!(!t.last().unwrap_or_default().contains("Diff:"));
    }

    #[test]
    fn test_passing_checks_record_nothing() {
        let mut t = RecordingSink::new();
        assert!(equal(&mut t, "a", "a", ()));
        assert!(equal_values(&mut t, &5i32, &5i64, ()));
        assert!(is_true(&mut t, true, ()));
        assert!(condition(&mut t, || 1 + 1 == 2, ()));
        assert!(t.is_empty());
    }
}
