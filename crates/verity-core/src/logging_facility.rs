//! Structured logging facility for Verity
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_failure!`, `log_op_pass!`)
//! - Test capture mode for deterministic assertions
//!
//! The library never installs a subscriber on its own. Reports reach the
//! failure sink whether or not logging is initialized.
//!
//! # Usage
//!
//! ```rust
//! use verity_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
