//! Conversion of native Rust values into [`Value`]
//!
//! Records opt in through [`reflect_struct!`](crate::reflect_struct).
//! Self-referential record types (a node holding `Option<Box<Node>>`) cannot
//! describe their type statically; build those as [`Value`] directly.

use crate::value::{FloatType, IntType, Mapping, Pointer, Sequence, TypeDesc, UintType, Value};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// A type that can present itself as a dynamic [`Value`]
pub trait Reflect {
    /// Static type of every value produced by [`Reflect::reflect`]
    fn type_desc() -> TypeDesc;

    fn reflect(&self) -> Value;
}

macro_rules! reflect_signed {
    ($($t:ty => $width:expr),* $(,)?) => {
        $(impl Reflect for $t {
            fn type_desc() -> TypeDesc {
                TypeDesc::Int($width)
            }

            fn reflect(&self) -> Value {
                Value::Int(*self as i64, $width)
            }
        })*
    };
}

macro_rules! reflect_unsigned {
    ($($t:ty => $width:expr),* $(,)?) => {
        $(impl Reflect for $t {
            fn type_desc() -> TypeDesc {
                TypeDesc::Uint($width)
            }

            fn reflect(&self) -> Value {
                Value::Uint(*self as u64, $width)
            }
        })*
    };
}

reflect_signed!(
    i8 => IntType::I8,
    i16 => IntType::I16,
    i32 => IntType::I32,
    i64 => IntType::I64,
    isize => IntType::Isize,
);

reflect_unsigned!(
    u8 => UintType::U8,
    u16 => UintType::U16,
    u32 => UintType::U32,
    u64 => UintType::U64,
    usize => UintType::Usize,
);

impl Reflect for f32 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Float(FloatType::F32)
    }

    fn reflect(&self) -> Value {
        Value::Float(f64::from(*self), FloatType::F32)
    }
}

impl Reflect for f64 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Float(FloatType::F64)
    }

    fn reflect(&self) -> Value {
        Value::Float(*self, FloatType::F64)
    }
}

impl Reflect for bool {
    fn type_desc() -> TypeDesc {
        TypeDesc::Bool
    }

    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Reflect for str {
    fn type_desc() -> TypeDesc {
        TypeDesc::Str
    }

    fn reflect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Reflect for String {
    fn type_desc() -> TypeDesc {
        TypeDesc::Str
    }

    fn reflect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Reflect for DateTime<Utc> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Time
    }

    fn reflect(&self) -> Value {
        Value::Time(*self)
    }
}

impl<T: Reflect> Reflect for [T] {
    fn type_desc() -> TypeDesc {
        TypeDesc::Seq(Box::new(T::type_desc()))
    }

    fn reflect(&self) -> Value {
        Value::Seq(Sequence::new(
            T::type_desc(),
            self.iter().map(Reflect::reflect).collect(),
        ))
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_desc() -> TypeDesc {
        <[T]>::type_desc()
    }

    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_desc() -> TypeDesc {
        TypeDesc::Array(Box::new(T::type_desc()), N)
    }

    fn reflect(&self) -> Value {
        Value::Array(Sequence::new(
            T::type_desc(),
            self.iter().map(Reflect::reflect).collect(),
        ))
    }
}

fn reflect_entries<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: Reflect + 'a,
    V: Reflect + 'a,
{
    Value::Map(Mapping::new(
        K::type_desc(),
        V::type_desc(),
        entries.map(|(k, v)| (k.reflect(), v.reflect())).collect(),
    ))
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Map(Box::new(K::type_desc()), Box::new(V::type_desc()))
    }

    fn reflect(&self) -> Value {
        reflect_entries(self.iter())
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Map(Box::new(K::type_desc()), Box::new(V::type_desc()))
    }

    fn reflect(&self) -> Value {
        reflect_entries(self.iter())
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Ptr(Box::new(T::type_desc()))
    }

    fn reflect(&self) -> Value {
        match self {
            Some(inner) => Value::Ptr(Pointer::to(T::type_desc(), inner.reflect())),
            None => Value::Ptr(Pointer::null(T::type_desc())),
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Ptr(Box::new(T::type_desc()))
    }

    fn reflect(&self) -> Value {
        Value::Ptr(Pointer::to(T::type_desc(), self.as_ref().reflect()))
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl Reflect for Value {
    fn type_desc() -> TypeDesc {
        TypeDesc::Any
    }

    fn reflect(&self) -> Value {
        self.clone()
    }
}

/// JSON documents decode the way a dynamically-typed unmarshaller would:
/// every number is an `f64`, arrays are `Vec<any>`, objects are
/// `Map<String, any>`.
impl Reflect for serde_json::Value {
    fn type_desc() -> TypeDesc {
        TypeDesc::Any
    }

    fn reflect(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                Value::Float(n.as_f64().unwrap_or(f64::NAN), FloatType::F64)
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::seq(TypeDesc::Any, items.iter().map(Reflect::reflect).collect())
            }
            serde_json::Value::Object(map) => Value::map(
                TypeDesc::Str,
                TypeDesc::Any,
                map.iter()
                    .map(|(k, v)| (Value::Str(k.clone()), v.reflect()))
                    .collect(),
            ),
        }
    }
}

/// Implement [`Reflect`] for a plain struct by listing its fields and types.
///
/// ```
/// use verity_core_types::{reflect_struct, Reflect};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// reflect_struct!(Point { x: i32, y: i32 });
///
/// let p = Point { x: 1, y: 2 };
/// assert_eq!(p.reflect().to_string(), "Point { x: 1, y: 2 }");
/// ```
#[macro_export]
macro_rules! reflect_struct {
    ($name:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::Reflect for $name {
            fn type_desc() -> $crate::TypeDesc {
                $crate::TypeDesc::Struct {
                    name: ::std::string::String::from(stringify!($name)),
                    fields: ::std::vec![$((
                        ::std::string::String::from(stringify!($field)),
                        <$fty as $crate::Reflect>::type_desc(),
                    )),*],
                }
            }

            fn reflect(&self) -> $crate::Value {
                $crate::Value::Struct($crate::Record {
                    name: ::std::string::String::from(stringify!($name)),
                    fields: ::std::vec![$($crate::Field::new(
                        stringify!($field),
                        <$fty as $crate::Reflect>::type_desc(),
                        $crate::Reflect::reflect(&self.$field),
                    )),*],
                })
            }
        }
    };
}
