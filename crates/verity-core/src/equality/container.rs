//! Containment, emptiness, zero-value and length queries

use crate::equality::strict::strict_equal;
use crate::errors::{EqualityError, Result};
use verity_core_types::{classify, zero_time, Kind, Value};

/// Whether `container` holds `element`.
///
/// - strings: substring containment (element must be a string)
/// - mappings: key membership
/// - sequences and arrays: element membership
///
/// Membership uses [`strict_equal`].
///
/// # Errors
///
/// - `NotContainable` for kinds that cannot contain anything
/// - `ElementMismatch` when searching a string for a non-string
pub fn contains(container: &Value, element: &Value) -> Result<bool> {
    match container {
        Value::Str(haystack) => match element {
            Value::Str(needle) => Ok(haystack.contains(needle.as_str())),
            other => Err(EqualityError::ElementMismatch {
                container_type: container.type_name(),
                element_type: other.type_name(),
            }),
        },
        Value::Map(m) => Ok(m.entries.iter().any(|(key, _)| strict_equal(key, element))),
        Value::Seq(s) | Value::Array(s) => Ok(s.items.iter().any(|item| strict_equal(item, element))),
        other => Err(EqualityError::NotContainable {
            container: other.to_string(),
        }),
    }
}

/// Whether a value is "empty".
///
/// True for `Nil`, `""`, `false`, numeric zero of any width, zero-length
/// sequences/mappings/channels, null pointers, and a pointer to the zero
/// time. False for everything else.
pub fn is_empty(value: &Value) -> bool {
    match classify(value) {
        Kind::Nil => true,
        Kind::Bool => matches!(value, Value::Bool(false)),
        Kind::Integer | Kind::Float => value.as_f64() == Some(0.0),
        Kind::Pointer => match value {
            Value::Ptr(p) => match &p.target {
                None => true,
                Some(target) => matches!(**target, Value::Time(t) if t == zero_time()),
            },
            _ => false,
        },
        kind if kind.has_len() => length(value).is_ok_and(|len| len == 0),
        _ => false,
    }
}

/// Whether a value equals the default-initialized value of its own type.
///
/// `Nil` is zero. Types without a constructible zero are never zero.
pub fn is_zero(value: &Value) -> bool {
    match value.type_desc() {
        None => true,
        Some(ty) => ty
            .zero_value()
            .is_some_and(|zero| strict_equal(value, &zero)),
    }
}

/// Nil sentinel, null pointer, or nil channel
pub fn is_nil(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Ptr(p) => p.is_null(),
        Value::Chan(c) => c.id == 0,
        _ => false,
    }
}

/// Length of strings (in bytes), sequences, arrays, mappings and channels.
///
/// # Errors
///
/// `LengthUndefined` for every other kind.
pub fn length(value: &Value) -> Result<usize> {
    match value {
        Value::Str(s) => Ok(s.len()),
        Value::Seq(s) | Value::Array(s) => Ok(s.items.len()),
        Value::Map(m) => Ok(m.entries.len()),
        Value::Chan(c) => Ok(c.len),
        other => Err(EqualityError::LengthUndefined {
            value: other.to_string(),
        }),
    }
}
