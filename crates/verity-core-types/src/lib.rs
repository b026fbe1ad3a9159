//! Core types shared across Verity facilities
//!
//! This crate is the leaf of the workspace:
//!
//! - **Value model**: `Value`, `TypeDesc` and the `Reflect` conversion trait
//! - **Classifier**: `Kind`, `classify`, `dereferenced_kind`
//! - **Call sites**: `CallFrame`, `CallTrace`
//! - **Schema constants**: canonical log field keys and event names

pub mod frame;
pub mod kind;
pub mod reflect;
pub mod schema;
pub mod value;

pub use frame::{CallFrame, CallTrace};
pub use kind::{classify, dereferenced_kind, kind_of_type, Kind};
pub use reflect::Reflect;
pub use value::{
    zero_time, Channel, Field, FloatType, IntType, Mapping, Opaque, Pointer, Record, Sequence,
    TypeDesc, UintType, Value,
};
