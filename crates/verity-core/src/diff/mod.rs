//! Structural differ.
//!
//! Renders both sides of a failed comparison with the canonical [`dump`]
//! and returns a line-based unified diff between them.
//!
//! ## Entry point
//!
//! ```
//! use verity_core::diff::diff;
//! use verity_core_types::Reflect;
//!
//! let text = diff(&vec![1, 2, 3].reflect(), &vec![1, 5, 3].reflect());
//! assert!(text.starts_with("--- Expected\n+++ Actual\n"));
//! ```
//!
//! ## Guarantees
//!
//! - **Composite only**: scalars, nil operands and operands of different
//!   types produce an empty diff.
//! - **Determinism**: mapping keys are sorted and no addresses are printed,
//!   so identical inputs produce byte-identical output.

pub mod dump;
pub mod engine;

pub use dump::dump;
pub use engine::diff;
