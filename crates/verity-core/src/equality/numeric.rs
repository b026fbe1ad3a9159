//! Absolute (delta) and relative (epsilon) numeric closeness

use crate::errors::{EqualityError, Result};
use verity_core_types::{classify, Value};

/// Numeric value widened to `f64`, for integer and float kinds only
fn number(value: &Value) -> Option<f64> {
    if classify(value).is_numeric() {
        value.as_f64()
    } else {
        None
    }
}

/// `|expected - actual| <= delta`.
///
/// # Errors
///
/// - `NonNumeric` if either operand is not a number
/// - `ExpectedNaN` / `ActualNaN` if either operand is NaN
/// - `OutsideDelta` if the operands are further apart than `delta`
pub fn delta_equal(expected: &Value, actual: &Value, delta: f64) -> Result<()> {
    let (Some(e), Some(a)) = (number(expected), number(actual)) else {
        return Err(EqualityError::NonNumeric {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    };

    if e.is_nan() {
        return Err(EqualityError::ExpectedNaN);
    }
    if a.is_nan() {
        return Err(EqualityError::ActualNaN {
            expected: expected.to_string(),
            delta,
        });
    }

    let difference = e - a;
    if difference < -delta || difference > delta {
        return Err(EqualityError::OutsideDelta {
            expected: expected.to_string(),
            actual: actual.to_string(),
            delta,
            difference,
        });
    }
    Ok(())
}

/// `min(|expected|, |actual|) * epsilon`, or 0 when either operand is not
/// a number
pub fn epsilon_delta(expected: &Value, actual: &Value, epsilon: f64) -> f64 {
    match (number(expected), number(actual)) {
        (Some(e), Some(a)) => e.abs().min(a.abs()) * epsilon,
        _ => 0.0,
    }
}

/// Relative closeness: [`delta_equal`] with the delta from [`epsilon_delta`].
///
/// # Errors
///
/// Same conditions as [`delta_equal`].
pub fn epsilon_equal(expected: &Value, actual: &Value, epsilon: f64) -> Result<()> {
    delta_equal(expected, actual, epsilon_delta(expected, actual, epsilon))
}

/// Index-aligned [`delta_equal`] over two sequences, stopping at the first
/// mismatch.
///
/// # Errors
///
/// - `NotSequence` unless both operands are sequences or arrays
/// - `LengthMismatch` if the lengths differ
/// - `AtIndex` wrapping the first failing element comparison
pub fn delta_equal_sequence(expected: &Value, actual: &Value, delta: f64) -> Result<()> {
    pairwise(expected, actual, |e, a| delta_equal(e, a, delta))
}

/// Index-aligned [`epsilon_equal`] over two sequences.
///
/// # Errors
///
/// Same conditions as [`delta_equal_sequence`].
pub fn epsilon_equal_sequence(expected: &Value, actual: &Value, epsilon: f64) -> Result<()> {
    pairwise(expected, actual, |e, a| epsilon_equal(e, a, epsilon))
}

fn items(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Seq(s) | Value::Array(s) => Some(&s.items),
        _ => None,
    }
}

fn pairwise<F>(expected: &Value, actual: &Value, check: F) -> Result<()>
where
    F: Fn(&Value, &Value) -> Result<()>,
{
    let (Some(expected_items), Some(actual_items)) = (items(expected), items(actual)) else {
        return Err(EqualityError::NotSequence {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    };
    if expected_items.len() != actual_items.len() {
        return Err(EqualityError::LengthMismatch {
            expected: expected_items.len(),
            actual: actual_items.len(),
        });
    }
    for (index, (e, a)) in expected_items.iter().zip(actual_items).enumerate() {
        check(e, a).map_err(|err| err.at_index(index))?;
    }
    Ok(())
}
