//! Dynamic value model
//!
//! [`Value`] is an owned, closed representation of an arbitrary test operand.
//! Every non-nil value carries its concrete [`TypeDesc`], so "same concrete
//! type?" can be answered without language-level reflection.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Seconds between the Unix epoch and 0001-01-01T00:00:00Z.
const ZERO_TIME_UNIX_SECS: i64 = -62_135_596_800;

/// The zero point-in-time (0001-01-01T00:00:00Z).
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ZERO_TIME_UNIX_SECS, 0)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Signed integer widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntType {
    I8,
    I16,
    I32,
    I64,
    Isize,
}

impl IntType {
    pub fn name(self) -> &'static str {
        match self {
            IntType::I8 => "i8",
            IntType::I16 => "i16",
            IntType::I32 => "i32",
            IntType::I64 => "i64",
            IntType::Isize => "isize",
        }
    }

    /// Inclusive range of representable values
    pub fn bounds(self) -> (i64, i64) {
        match self {
            IntType::I8 => (i8::MIN as i64, i8::MAX as i64),
            IntType::I16 => (i16::MIN as i64, i16::MAX as i64),
            IntType::I32 => (i32::MIN as i64, i32::MAX as i64),
            IntType::I64 => (i64::MIN, i64::MAX),
            IntType::Isize => (isize::MIN as i64, isize::MAX as i64),
        }
    }
}

/// Unsigned integer widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintType {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl UintType {
    pub fn name(self) -> &'static str {
        match self {
            UintType::U8 => "u8",
            UintType::U16 => "u16",
            UintType::U32 => "u32",
            UintType::U64 => "u64",
            UintType::Usize => "usize",
        }
    }

    pub fn max(self) -> u64 {
        match self {
            UintType::U8 => u8::MAX as u64,
            UintType::U16 => u16::MAX as u64,
            UintType::U32 => u32::MAX as u64,
            UintType::U64 => u64::MAX,
            UintType::Usize => usize::MAX as u64,
        }
    }
}

/// Floating-point widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatType {
    F32,
    F64,
}

impl FloatType {
    pub fn name(self) -> &'static str {
        match self {
            FloatType::F32 => "f32",
            FloatType::F64 => "f64",
        }
    }
}

/// Concrete type of a value
///
/// Two values have "identical concrete types" exactly when their
/// descriptors compare equal. `Any` is the heterogeneous element type used
/// by dynamically-shaped data such as JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Any,
    Bool,
    Int(IntType),
    Uint(UintType),
    Float(FloatType),
    Str,
    Time,
    Seq(Box<TypeDesc>),
    Array(Box<TypeDesc>, usize),
    Map(Box<TypeDesc>, Box<TypeDesc>),
    Chan(Box<TypeDesc>),
    Ptr(Box<TypeDesc>),
    Struct {
        name: String,
        fields: Vec<(String, TypeDesc)>,
    },
    Opaque(String),
}

impl TypeDesc {
    /// Follow one level of pointer indirection
    pub fn deref(&self) -> &TypeDesc {
        match self {
            TypeDesc::Ptr(inner) => inner,
            other => other,
        }
    }

    /// Whether this is `Vec<u8>`
    pub fn is_byte_seq(&self) -> bool {
        matches!(self, TypeDesc::Seq(elem) if **elem == TypeDesc::Uint(UintType::U8))
    }

    /// Default-initialized value of this type.
    ///
    /// Returns `None` for opaque types, which have no constructible zero.
    pub fn zero_value(&self) -> Option<Value> {
        let value = match self {
            TypeDesc::Any => Value::Nil,
            TypeDesc::Bool => Value::Bool(false),
            TypeDesc::Int(t) => Value::Int(0, *t),
            TypeDesc::Uint(t) => Value::Uint(0, *t),
            TypeDesc::Float(t) => Value::Float(0.0, *t),
            TypeDesc::Str => Value::Str(String::new()),
            TypeDesc::Time => Value::Time(zero_time()),
            TypeDesc::Seq(elem) => Value::Seq(Sequence::new((**elem).clone(), Vec::new())),
            TypeDesc::Array(elem, len) => {
                let zero = elem.zero_value()?;
                Value::Array(Sequence::new((**elem).clone(), vec![zero; *len]))
            }
            TypeDesc::Map(key, value) => Value::Map(Mapping::new(
                (**key).clone(),
                (**value).clone(),
                Vec::new(),
            )),
            TypeDesc::Chan(elem) => Value::Chan(Channel::nil((**elem).clone())),
            TypeDesc::Ptr(pointee) => Value::Ptr(Pointer::null((**pointee).clone())),
            TypeDesc::Struct { name, fields } => {
                let mut record = Record::new(name.clone());
                for (field_name, ty) in fields {
                    record
                        .fields
                        .push(Field::new(field_name.clone(), ty.clone(), ty.zero_value()?));
                }
                Value::Struct(record)
            }
            TypeDesc::Opaque(_) => return None,
        };
        Some(value)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Any => write!(f, "any"),
            TypeDesc::Bool => write!(f, "bool"),
            TypeDesc::Int(t) => write!(f, "{}", t.name()),
            TypeDesc::Uint(t) => write!(f, "{}", t.name()),
            TypeDesc::Float(t) => write!(f, "{}", t.name()),
            TypeDesc::Str => write!(f, "String"),
            TypeDesc::Time => write!(f, "DateTime<Utc>"),
            TypeDesc::Seq(elem) => write!(f, "Vec<{}>", elem),
            TypeDesc::Array(elem, len) => write!(f, "[{}; {}]", elem, len),
            TypeDesc::Map(key, value) => write!(f, "Map<{}, {}>", key, value),
            TypeDesc::Chan(elem) => write!(f, "Chan<{}>", elem),
            TypeDesc::Ptr(pointee) => write!(f, "Option<{}>", pointee),
            TypeDesc::Struct { name, .. } => write!(f, "{}", name),
            TypeDesc::Opaque(name) => write!(f, "{}", name),
        }
    }
}

/// Ordered elements sharing a declared element type
#[derive(Debug, Clone)]
pub struct Sequence {
    pub elem: TypeDesc,
    pub items: Vec<Value>,
}

impl Sequence {
    pub fn new(elem: TypeDesc, items: Vec<Value>) -> Self {
        Self { elem, items }
    }
}

/// Key/value entries. Entry order carries no meaning.
#[derive(Debug, Clone)]
pub struct Mapping {
    pub key: TypeDesc,
    pub value: TypeDesc,
    pub entries: Vec<(Value, Value)>,
}

impl Mapping {
    pub fn new(key: TypeDesc, value: TypeDesc, entries: Vec<(Value, Value)>) -> Self {
        Self {
            key,
            value,
            entries,
        }
    }

    /// Entries ordered by [`Value::canonical_cmp`] on their keys
    pub fn sorted_entries(&self) -> Vec<&(Value, Value)> {
        let mut entries: Vec<&(Value, Value)> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.canonical_cmp(&b.0));
        entries
    }
}

/// Channel-like handle: compared by identity, measured by queued length.
///
/// Identity `0` is the nil channel.
#[derive(Debug, Clone)]
pub struct Channel {
    pub elem: TypeDesc,
    pub id: u64,
    pub len: usize,
}

impl Channel {
    pub fn new(elem: TypeDesc, id: u64, len: usize) -> Self {
        Self { elem, id, len }
    }

    pub fn nil(elem: TypeDesc) -> Self {
        Self::new(elem, 0, 0)
    }
}

/// Pointer or optional reference
#[derive(Debug, Clone)]
pub struct Pointer {
    pub pointee: TypeDesc,
    pub target: Option<Box<Value>>,
}

impl Pointer {
    pub fn null(pointee: TypeDesc) -> Self {
        Self {
            pointee,
            target: None,
        }
    }

    pub fn to(pointee: TypeDesc, target: Value) -> Self {
        Self {
            pointee,
            target: Some(Box::new(target)),
        }
    }

    pub fn is_null(&self) -> bool {
        self.target.is_none()
    }
}

/// A named record field with its declared type
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: TypeDesc,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDesc, value: Value) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
        }
    }
}

/// Struct/record value
#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field whose declared type is the value's own type
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = value.type_desc().unwrap_or(TypeDesc::Any);
        self.fields.push(Field::new(name, ty, value));
        self
    }

    /// Add a field with an explicit declared type
    pub fn typed_field(mut self, name: impl Into<String>, ty: TypeDesc, value: Value) -> Self {
        self.fields.push(Field::new(name, ty, value));
        self
    }

    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::Struct {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.ty.clone()))
                .collect(),
        }
    }
}

/// Value whose contents cannot be inspected; compared by identity only
#[derive(Debug, Clone)]
pub struct Opaque {
    pub type_name: String,
    pub id: u64,
}

/// A dynamically-typed operand
#[derive(Debug, Clone)]
pub enum Value {
    /// The untyped absent sentinel
    Nil,
    Bool(bool),
    Int(i64, IntType),
    Uint(u64, UintType),
    /// `f32` values are stored widened, which is exact
    Float(f64, FloatType),
    Str(String),
    Time(DateTime<Utc>),
    Seq(Sequence),
    Array(Sequence),
    Map(Mapping),
    Chan(Channel),
    Ptr(Pointer),
    Struct(Record),
    Opaque(Opaque),
}

impl Value {
    pub fn seq(elem: TypeDesc, items: Vec<Value>) -> Self {
        Value::Seq(Sequence::new(elem, items))
    }

    pub fn array(elem: TypeDesc, items: Vec<Value>) -> Self {
        Value::Array(Sequence::new(elem, items))
    }

    pub fn map(key: TypeDesc, value: TypeDesc, entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Mapping::new(key, value, entries))
    }

    pub fn channel(elem: TypeDesc, id: u64, len: usize) -> Self {
        Value::Chan(Channel::new(elem, id, len))
    }

    pub fn null_ptr(pointee: TypeDesc) -> Self {
        Value::Ptr(Pointer::null(pointee))
    }

    /// Pointer to `target`, typed after the target's own type
    pub fn ptr_to(target: Value) -> Self {
        let pointee = target.type_desc().unwrap_or(TypeDesc::Any);
        Value::Ptr(Pointer::to(pointee, target))
    }

    pub fn opaque(type_name: impl Into<String>, id: u64) -> Self {
        Value::Opaque(Opaque {
            type_name: type_name.into(),
            id,
        })
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Concrete type, or `None` for the nil sentinel
    pub fn type_desc(&self) -> Option<TypeDesc> {
        let desc = match self {
            Value::Nil => return None,
            Value::Bool(_) => TypeDesc::Bool,
            Value::Int(_, t) => TypeDesc::Int(*t),
            Value::Uint(_, t) => TypeDesc::Uint(*t),
            Value::Float(_, t) => TypeDesc::Float(*t),
            Value::Str(_) => TypeDesc::Str,
            Value::Time(_) => TypeDesc::Time,
            Value::Seq(s) => TypeDesc::Seq(Box::new(s.elem.clone())),
            Value::Array(s) => TypeDesc::Array(Box::new(s.elem.clone()), s.items.len()),
            Value::Map(m) => TypeDesc::Map(Box::new(m.key.clone()), Box::new(m.value.clone())),
            Value::Chan(c) => TypeDesc::Chan(Box::new(c.elem.clone())),
            Value::Ptr(p) => TypeDesc::Ptr(Box::new(p.pointee.clone())),
            Value::Struct(r) => r.type_desc(),
            Value::Opaque(o) => TypeDesc::Opaque(o.type_name.clone()),
        };
        Some(desc)
    }

    /// Human-readable type name, `nil` for the sentinel
    pub fn type_name(&self) -> String {
        self.type_desc()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "nil".to_string())
    }

    /// Numeric value widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v, _) => Some(*v as f64),
            Value::Uint(v, _) => Some(*v as f64),
            Value::Float(v, _) => Some(*v),
            _ => None,
        }
    }

    /// Deterministic ordering used for map keys in renderings.
    ///
    /// Numbers order numerically, strings lexically, times chronologically.
    /// Anything else falls back to comparing rendered text.
    pub fn canonical_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::Int(a, _), Value::Int(b, _)) => a.cmp(b),
            (Value::Uint(a, _), Value::Uint(b, _)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a
                    .partial_cmp(&b)
                    .unwrap_or_else(|| self.to_string().cmp(&other.to_string())),
                _ => self.to_string().cmp(&other.to_string()),
            },
        }
    }

    /// Type-qualified rendering, e.g. `i32(5)` or `"text"`
    pub fn typed(&self) -> Typed<'_> {
        Typed(self)
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

fn fmt_items(items: &[Value], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        item.fmt_nested(f)?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "<nil>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(v, _) => write!(f, "{}", v),
            Value::Uint(v, _) => write!(f, "{}", v),
            Value::Float(v, _) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
            Value::Time(t) => write!(f, "{}", t),
            Value::Seq(s) | Value::Array(s) => fmt_items(&s.items, f),
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.sorted_entries().into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    k.fmt_nested(f)?;
                    write!(f, ": ")?;
                    v.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
            Value::Chan(c) => write!(f, "chan#{}(len={})", c.id, c.len),
            Value::Ptr(p) => match &p.target {
                None => write!(f, "None"),
                Some(target) => {
                    write!(f, "&")?;
                    target.fmt_nested(f)
                }
            },
            Value::Struct(r) => {
                write!(f, "{} {{", r.name)?;
                for (i, field) in r.fields.iter().enumerate() {
                    write!(f, "{}{}: ", if i > 0 { ", " } else { " " }, field.name)?;
                    field.value.fmt_nested(f)?;
                }
                if r.fields.is_empty() {
                    write!(f, "}}")
                } else {
                    write!(f, " }}")
                }
            }
            Value::Opaque(o) => write!(f, "<{}#{}>", o.type_name, o.id),
        }
    }
}

/// See [`Value::typed`]
pub struct Typed<'a>(&'a Value);

impl fmt::Display for Typed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        match value {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Int(..) | Value::Uint(..) | Value::Float(..) | Value::Time(_) => {
                write!(f, "{}({})", value.type_name(), value)
            }
            Value::Struct(_) | Value::Opaque(_) => write!(f, "{}", value),
            _ => write!(f, "{}{}", value.type_name(), value),
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Struct(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_time_is_year_one() {
        assert_eq!(zero_time().to_rfc3339(), "0001-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_type_desc_of_array_includes_length() {
        let v = Value::array(
            TypeDesc::Int(IntType::I32),
            vec![Value::Int(1, IntType::I32), Value::Int(2, IntType::I32)],
        );
        assert_eq!(v.type_name(), "[i32; 2]");
    }

    #[test]
    fn test_zero_value_of_struct() {
        let ty = TypeDesc::Struct {
            name: "Point".to_string(),
            fields: vec![
                ("x".to_string(), TypeDesc::Int(IntType::I32)),
                ("label".to_string(), TypeDesc::Str),
            ],
        };
        let zero = ty.zero_value().unwrap();
        assert_eq!(zero.to_string(), "Point { x: 0, label: \"\" }");
        assert_eq!(zero.type_desc(), Some(ty));
    }

    #[test]
    fn test_opaque_has_no_zero() {
        assert!(TypeDesc::Opaque("Handle".to_string()).zero_value().is_none());
        let nested = TypeDesc::Array(Box::new(TypeDesc::Opaque("Handle".to_string())), 2);
        assert!(nested.zero_value().is_none());
    }

    #[test]
    fn test_map_display_sorts_keys() {
        let v = Value::map(
            TypeDesc::Int(IntType::I64),
            TypeDesc::Str,
            vec![
                (Value::Int(10, IntType::I64), Value::Str("ten".into())),
                (Value::Int(9, IntType::I64), Value::Str("nine".into())),
            ],
        );
        assert_eq!(v.to_string(), "{9: \"nine\", 10: \"ten\"}");
    }

    #[test]
    fn test_typed_rendering() {
        assert_eq!(Value::Int(5, IntType::I32).typed().to_string(), "i32(5)");
        assert_eq!(Value::Str("a".into()).typed().to_string(), "\"a\"");
        assert_eq!(Value::Nil.typed().to_string(), "nil");
        let seq = Value::seq(TypeDesc::Str, vec![Value::Str("a".into())]);
        assert_eq!(seq.typed().to_string(), "Vec<String>[\"a\"]");
    }

    #[test]
    fn test_null_pointer_display() {
        assert_eq!(Value::null_ptr(TypeDesc::Str).to_string(), "None");
        let p = Value::ptr_to(Value::Str("x".into()));
        assert_eq!(p.to_string(), "&\"x\"");
        assert_eq!(p.type_name(), "Option<String>");
    }
}
