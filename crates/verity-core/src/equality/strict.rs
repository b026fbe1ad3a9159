//! Structural equality and lossless coercion

use crate::errors::{EqualityError, Result};
use verity_core_types::{FloatType, IntType, Mapping, Reflect, TypeDesc, UintType, Value};

/// Deep structural equality with no type coercion.
///
/// `Nil` equals only `Nil`. Otherwise both values must have identical
/// concrete types and equal contents. Floats follow IEEE comparison, so a
/// value holding NaN is not equal to itself.
pub fn strict_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Nil, Value::Nil) => true,
        (Value::Nil, _) | (_, Value::Nil) => false,
        _ => deep_equal(expected, actual),
    }
}

/// `strict_equal`, or `expected` losslessly coerced to the type of
/// `actual` is `strict_equal` to it.
///
/// Coercion only ever runs from expected to actual's type.
pub fn value_equal(expected: &Value, actual: &Value) -> bool {
    if strict_equal(expected, actual) {
        return true;
    }
    let Some(target) = actual.type_desc() else {
        return false;
    };
    match coerce(expected, &target) {
        Some(coerced) => strict_equal(&coerced, actual),
        None => false,
    }
}

/// Identical concrete types and `strict_equal`
pub fn exact_equal(expected: &Value, actual: &Value) -> bool {
    expected.type_desc() == actual.type_desc() && strict_equal(expected, actual)
}

/// Like [`exact_equal`], but reports a type mismatch as an error.
///
/// # Errors
///
/// `TypeMismatch` when the concrete types differ.
pub fn check_exact(expected: &Value, actual: &Value) -> Result<bool> {
    if expected.type_desc() != actual.type_desc() {
        return Err(EqualityError::TypeMismatch {
            expected_type: expected.type_name(),
            actual_type: actual.type_name(),
        });
    }
    Ok(strict_equal(expected, actual))
}

fn deep_equal(a: &Value, b: &Value) -> bool {
    if a.type_desc() != b.type_desc() {
        return false;
    }
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x, _), Value::Int(y, _)) => x == y,
        (Value::Uint(x, _), Value::Uint(y, _)) => x == y,
        (Value::Float(x, _), Value::Float(y, _)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Time(x), Value::Time(y)) => x == y,
        (Value::Seq(x), Value::Seq(y)) | (Value::Array(x), Value::Array(y)) => {
            x.items.len() == y.items.len()
                && x.items.iter().zip(&y.items).all(|(p, q)| deep_equal(p, q))
        }
        (Value::Map(x), Value::Map(y)) => maps_equal(x, y),
        (Value::Chan(x), Value::Chan(y)) => x.id == y.id,
        (Value::Ptr(x), Value::Ptr(y)) => match (&x.target, &y.target) {
            (None, None) => true,
            (Some(p), Some(q)) => deep_equal(p, q),
            _ => false,
        },
        (Value::Struct(x), Value::Struct(y)) => x
            .fields
            .iter()
            .zip(&y.fields)
            .all(|(f, g)| deep_equal(&f.value, &g.value)),
        (Value::Opaque(x), Value::Opaque(y)) => x.id == y.id,
        _ => false,
    }
}

/// Same entry count, and every key of either side maps to an equal value
/// on the other side. Repeated keys are possible in hand-built mappings.
fn maps_equal(x: &Mapping, y: &Mapping) -> bool {
    x.entries.len() == y.entries.len() && covers(x, y) && covers(y, x)
}

fn covers(x: &Mapping, y: &Mapping) -> bool {
    x.entries.iter().all(|(key, value)| {
        y.entries
            .iter()
            .find(|(other_key, _)| strict_equal(key, other_key))
            .is_some_and(|(_, other_value)| deep_equal(value, other_value))
    })
}

#[derive(Clone, Copy)]
enum Num {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

fn as_num(value: &Value) -> Option<Num> {
    match value {
        Value::Int(v, _) => Some(Num::Signed(*v)),
        Value::Uint(v, _) => Some(Num::Unsigned(*v)),
        Value::Float(v, _) => Some(Num::Float(*v)),
        _ => None,
    }
}

/// Exact integral value, if the number has one
fn integral(num: Num) -> Option<i128> {
    match num {
        Num::Signed(v) => Some(i128::from(v)),
        Num::Unsigned(v) => Some(i128::from(v)),
        Num::Float(v) => {
            // 2^64 bounds every integer a target width can hold
            if v.is_finite() && v.fract() == 0.0 && v.abs() < 18_446_744_073_709_551_616.0 {
                Some(v as i128)
            } else {
                None
            }
        }
    }
}

fn to_int(num: Num, width: IntType) -> Option<Value> {
    let v = integral(num)?;
    let (min, max) = width.bounds();
    if v < i128::from(min) || v > i128::from(max) {
        return None;
    }
    Some(Value::Int(v as i64, width))
}

fn to_uint(num: Num, width: UintType) -> Option<Value> {
    let v = integral(num)?;
    if v < 0 || v > i128::from(width.max()) {
        return None;
    }
    Some(Value::Uint(v as u64, width))
}

fn to_float(num: Num, width: FloatType) -> Option<Value> {
    let exact = match (num, width) {
        (Num::Signed(v), FloatType::F64) => (v as f64) as i128 == i128::from(v),
        (Num::Unsigned(v), FloatType::F64) => (v as f64) as i128 == i128::from(v),
        (Num::Signed(v), FloatType::F32) => (v as f32) as i128 == i128::from(v),
        (Num::Unsigned(v), FloatType::F32) => (v as f32) as i128 == i128::from(v),
        (Num::Float(_), FloatType::F64) => true,
        (Num::Float(v), FloatType::F32) => v.is_nan() || f64::from(v as f32) == v,
    };
    if !exact {
        return None;
    }
    let widened = match num {
        Num::Signed(v) => v as f64,
        Num::Unsigned(v) => v as f64,
        Num::Float(v) => v,
    };
    Some(Value::Float(widened, width))
}

/// Convert `value` to `target` without losing information.
///
/// Supported conversions:
/// - numeric to numeric, when the number is exactly representable
/// - `String` to `Vec<u8>`
/// - `Vec<u8>` to `String`, when the bytes are valid UTF-8
///
/// Returns `None` for anything else.
pub fn coerce(value: &Value, target: &TypeDesc) -> Option<Value> {
    if value.type_desc().as_ref() == Some(target) {
        return Some(value.clone());
    }
    if let Some(num) = as_num(value) {
        return match target {
            TypeDesc::Int(width) => to_int(num, *width),
            TypeDesc::Uint(width) => to_uint(num, *width),
            TypeDesc::Float(width) => to_float(num, *width),
            _ => None,
        };
    }
    match (value, target) {
        (Value::Str(s), t) if t.is_byte_seq() => Some(s.as_bytes().reflect()),
        (Value::Seq(seq), TypeDesc::Str) if seq.elem == TypeDesc::Uint(UintType::U8) => {
            let bytes = seq
                .items
                .iter()
                .map(|item| match item {
                    Value::Uint(b, UintType::U8) => u8::try_from(*b).ok(),
                    _ => None,
                })
                .collect::<Option<Vec<u8>>>()?;
            String::from_utf8(bytes).ok().map(Value::Str)
        }
        _ => None,
    }
}
