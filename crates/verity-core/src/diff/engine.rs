//! Unified diff between the dumps of two values

use crate::diff::dump::dump;
use similar::TextDiff;
use verity_core_types::{kind_of_type, Value};

/// Lines of context around each change
const CONTEXT_LINES: usize = 1;

/// Unified diff of `expected` against `actual`.
///
/// Empty unless both values are non-nil, their types agree after one level
/// of pointer indirection, and that type is a struct, mapping, sequence or
/// array.
pub fn diff(expected: &Value, actual: &Value) -> String {
    let (Some(expected_type), Some(actual_type)) = (expected.type_desc(), actual.type_desc())
    else {
        return String::new();
    };

    let ty = expected_type.deref();
    if ty != actual_type.deref() || !kind_of_type(ty).is_composite() {
        return String::new();
    }

    let e = dump(expected);
    let a = dump(actual);

    TextDiff::from_lines(e.as_str(), a.as_str())
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header("Expected", "Actual")
        .to_string()
}
