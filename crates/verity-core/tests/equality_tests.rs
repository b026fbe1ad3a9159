#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{BTreeMap, HashMap};
use verity_core::equality::{
    check_exact, contains, delta_equal, delta_equal_sequence, epsilon_equal, exact_equal,
    is_empty, is_zero, length, strict_equal, value_equal,
};
use verity_core::errors::{EqualityError, FailureKind};
use verity_core::types::{reflect_struct, zero_time, Reflect, TypeDesc, Value};

#[derive(Debug, Clone, Default)]
struct Account {
    owner: String,
    balance: i64,
    tags: Vec<String>,
}

reflect_struct!(Account {
    owner: String,
    balance: i64,
    tags: Vec<String>,
});

fn account(owner: &str, balance: i64) -> Account {
    Account {
        owner: owner.to_string(),
        balance,
        tags: vec!["primary".to_string()],
    }
}

#[test]
fn test_strict_equal_on_records() {
    let a = account("ada", 10).reflect();
    let b = account("ada", 10).reflect();
    let c = account("ada", 11).reflect();
    assert!(strict_equal(&a, &b));
    assert!(!strict_equal(&a, &c));
}

#[test]
fn test_nan_is_not_reflexive() {
    let nan = f64::NAN.reflect();
    assert!(!strict_equal(&nan, &nan));
    assert!(!strict_equal(&vec![f64::NAN].reflect(), &vec![f64::NAN].reflect()));
}

#[test]
fn test_value_vs_exact_for_widened_integers() {
    let small = 5i32.reflect();
    let wide = 5i64.reflect();
    assert!(value_equal(&small, &wide));
    assert!(!exact_equal(&small, &wide));
    assert!(!strict_equal(&small, &wide));

    let err = check_exact(&small, &wide).unwrap_err();
    assert_eq!(err.kind(), FailureKind::TypeMismatch);
    assert_eq!(err.to_string(), "Types expected to match exactly\n\ti32 != i64");
}

#[test]
fn test_value_equal_table() {
    let cases: Vec<(Value, Value, bool)> = vec![
        (123u32.reflect(), 123i32.reflect(), true),
        (7u8.reflect(), 7.0f32.reflect(), true),
        (0.5f32.reflect(), 0.5f64.reflect(), true),
        (256i32.reflect(), 0u8.reflect(), false),
        (1.25f64.reflect(), 1i64.reflect(), false),
        ("text".reflect(), "text".as_bytes().reflect(), true),
        ("text".reflect(), "other".reflect(), false),
        (Value::Nil, Value::Nil, true),
        (Value::Nil, None::<i32>.reflect(), false),
    ];
    for (expected, actual, want) in cases {
        assert_eq!(
            value_equal(&expected, &actual),
            want,
            "value_equal({}, {})",
            expected.typed(),
            actual.typed()
        );
    }
}

#[test]
fn test_containment_table() {
    let map: HashMap<String, String> =
        HashMap::from([("Hello".to_string(), "World".to_string())]);
    let cases: Vec<(Value, Value, Result<bool, FailureKind>)> = vec![
        ("Hello World".reflect(), "World".reflect(), Ok(true)),
        ("Hello World".reflect(), "Earth".reflect(), Ok(false)),
        (vec!["Hello", "World"].reflect(), "World".reflect(), Ok(true)),
        (vec!["Hello", "World"].reflect(), "Earth".reflect(), Ok(false)),
        (map.reflect(), "Hello".reflect(), Ok(true)),
        (map.reflect(), "World".reflect(), Ok(false)),
        (["x", "y"].reflect(), "y".reflect(), Ok(true)),
        (42i32.reflect(), 4i32.reflect(), Err(FailureKind::TypeMismatch)),
    ];
    for (container, element, want) in cases {
        let got = contains(&container, &element).map_err(|e| e.kind());
        assert_eq!(got, want, "contains({}, {})", container, element);
    }
}

#[test]
fn test_emptiness_table() {
    let empty: Vec<Value> = vec![
        Value::Nil,
        "".reflect(),
        false.reflect(),
        0i8.reflect(),
        0u32.reflect(),
        0.0f32.reflect(),
        Vec::<String>::new().reflect(),
        BTreeMap::<i32, i32>::new().reflect(),
        None::<Account>.reflect(),
        Some(zero_time()).reflect(),
        Value::channel(TypeDesc::Str, 9, 0),
    ];
    for value in &empty {
        assert!(is_empty(value), "{} should be empty", value.typed());
    }

    let non_empty: Vec<Value> = vec![
        "x".reflect(),
        true.reflect(),
        (-1i64).reflect(),
        vec![0u8].reflect(),
        Some(0i32).reflect(),
        account("ada", 0).reflect(),
        Value::opaque("Socket", 4),
    ];
    for value in &non_empty {
        assert!(!is_empty(value), "{} should not be empty", value.typed());
    }
}

#[test]
fn test_zero_of_derived_record() {
    assert!(is_zero(&Account::default().reflect()));
    assert!(!is_zero(&account("", 0).reflect()));
}

#[test]
fn test_length_of_kinds() {
    assert_eq!(length(&"four".reflect()).unwrap(), 4);
    assert_eq!(length(&[1u16; 5].reflect()).unwrap(), 5);
    let err = length(&true.reflect()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::LengthUndefined);
    assert_eq!(err.code(), "ERR_LENGTH_UNDEFINED");
}

#[test]
fn test_delta_examples() {
    assert!(delta_equal(&3.14159f64.reflect(), &(22.0f64 / 7.0).reflect(), 0.01).is_ok());
    let err = delta_equal(&3.0f64.reflect(), &3.02f64.reflect(), 0.01).unwrap_err();
    assert_eq!(err.kind(), FailureKind::AssertionMismatch);
    assert!(err
        .to_string()
        .starts_with("Max difference between 3 and 3.02 allowed is 0.01"));
}

#[test]
fn test_infinities_are_not_rejected() {
    // inf - inf is NaN, which is neither above nor below the delta
    let inf = f64::INFINITY.reflect();
    assert!(delta_equal(&inf, &inf, 0.0).is_ok());
}

#[test]
fn test_sequence_delta_compares_expected_against_actual() {
    let expected = vec![1.0f64, 2.0].reflect();
    let actual = vec![1.0f64, f64::NAN].reflect();
    let err = delta_equal_sequence(&expected, &actual, 0.5).unwrap_err();
    match err {
        EqualityError::AtIndex { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(*source, EqualityError::ActualNaN { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_epsilon_relative_error() {
    assert!(epsilon_equal(&1000u32.reflect(), &1009.0f64.reflect(), 0.01).is_ok());
    assert!(epsilon_equal(&1000u32.reflect(), &1011.0f64.reflect(), 0.01).is_err());
}
