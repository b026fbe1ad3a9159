//! Value classification
//!
//! Every higher-level predicate switches on [`Kind`] rather than on the
//! concrete variant of a [`Value`].

use crate::value::{TypeDesc, Value};
use serde::{Deserialize, Serialize};

/// Coarse runtime kind of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Nil,
    Bool,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
    Channel,
    Pointer,
    Struct,
    Other,
}

impl Kind {
    /// Kinds the structural differ renders
    pub fn is_composite(self) -> bool {
        matches!(self, Kind::Sequence | Kind::Mapping | Kind::Struct)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Integer | Kind::Float)
    }

    /// Kinds with a defined length
    pub fn has_len(self) -> bool {
        matches!(
            self,
            Kind::String | Kind::Sequence | Kind::Mapping | Kind::Channel
        )
    }
}

/// Classify a value. Total over every input.
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Nil => Kind::Nil,
        Value::Bool(_) => Kind::Bool,
        Value::Int(..) | Value::Uint(..) => Kind::Integer,
        Value::Float(..) => Kind::Float,
        Value::Str(_) => Kind::String,
        Value::Seq(_) | Value::Array(_) => Kind::Sequence,
        Value::Map(_) => Kind::Mapping,
        Value::Chan(_) => Kind::Channel,
        Value::Ptr(_) => Kind::Pointer,
        // A point-in-time is a record of its components
        Value::Struct(_) | Value::Time(_) => Kind::Struct,
        Value::Opaque(_) => Kind::Other,
    }
}

/// Kind after following one level of pointer indirection.
///
/// A null pointer stays [`Kind::Pointer`].
pub fn dereferenced_kind(value: &Value) -> Kind {
    match value {
        Value::Ptr(p) => match &p.target {
            Some(target) => classify(target),
            None => Kind::Pointer,
        },
        other => classify(other),
    }
}

/// Kind of values of a given type
pub fn kind_of_type(ty: &TypeDesc) -> Kind {
    match ty {
        TypeDesc::Any | TypeDesc::Opaque(_) => Kind::Other,
        TypeDesc::Bool => Kind::Bool,
        TypeDesc::Int(_) | TypeDesc::Uint(_) => Kind::Integer,
        TypeDesc::Float(_) => Kind::Float,
        TypeDesc::Str => Kind::String,
        TypeDesc::Time | TypeDesc::Struct { .. } => Kind::Struct,
        TypeDesc::Seq(_) | TypeDesc::Array(..) => Kind::Sequence,
        TypeDesc::Map(..) => Kind::Mapping,
        TypeDesc::Chan(_) => Kind::Channel,
        TypeDesc::Ptr(_) => Kind::Pointer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{IntType, Record};

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify(&Value::Nil), Kind::Nil);
        assert_eq!(classify(&Value::Bool(true)), Kind::Bool);
        assert_eq!(classify(&Value::Int(1, IntType::I8)), Kind::Integer);
        assert_eq!(classify(&Value::Str(String::new())), Kind::String);
    }

    #[test]
    fn test_opaque_is_other() {
        assert_eq!(classify(&Value::opaque("Socket", 7)), Kind::Other);
    }

    #[test]
    fn test_dereferenced_kind_follows_one_level() {
        let record = Value::from(Record::new("Point").field("x", Value::Int(1, IntType::I32)));
        let ptr = Value::ptr_to(record);
        assert_eq!(classify(&ptr), Kind::Pointer);
        assert_eq!(dereferenced_kind(&ptr), Kind::Struct);

        let double = Value::ptr_to(ptr);
        assert_eq!(dereferenced_kind(&double), Kind::Pointer);
    }

    #[test]
    fn test_null_pointer_stays_pointer() {
        let ptr = Value::null_ptr(TypeDesc::Str);
        assert_eq!(dereferenced_kind(&ptr), Kind::Pointer);
    }

    #[test]
    fn test_kind_of_type_matches_classify_for_zero_values() {
        let types = vec![
            TypeDesc::Bool,
            TypeDesc::Str,
            TypeDesc::Time,
            TypeDesc::Seq(Box::new(TypeDesc::Bool)),
            TypeDesc::Map(Box::new(TypeDesc::Str), Box::new(TypeDesc::Any)),
            TypeDesc::Chan(Box::new(TypeDesc::Bool)),
            TypeDesc::Ptr(Box::new(TypeDesc::Str)),
        ];
        for ty in types {
            let zero = ty.zero_value().unwrap();
            assert_eq!(classify(&zero), kind_of_type(&ty), "type {}", ty);
        }
    }
}
