//! Equality engine
//!
//! Predicate families over [`Value`](verity_core_types::Value):
//!
//! - **strict**: deep structural equality, no coercion (`strict_equal`)
//! - **value**: strict, or lossless coercion of expected to actual's type
//!   (`value_equal`)
//! - **exact**: identical concrete types plus strict (`exact_equal`,
//!   `check_exact`)
//! - **delta / epsilon**: numeric closeness, scalar and pairwise
//! - **container**: `contains`, `is_empty`, `is_zero`, `is_nil`, `length`
//!
//! Every predicate is total. Conditions that make a comparison meaningless
//! come back as [`EqualityError`](crate::errors::EqualityError), never as a
//! panic.

pub mod container;
pub mod numeric;
pub mod strict;

pub use container::{contains, is_empty, is_nil, is_zero, length};
pub use numeric::{
    delta_equal, delta_equal_sequence, epsilon_delta, epsilon_equal, epsilon_equal_sequence,
};
pub use strict::{check_exact, coerce, exact_equal, strict_equal, value_equal};
