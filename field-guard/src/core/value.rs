//! Value categories and borrowed field values.
//!
//! [`ValueKind`] is the declared category of a record field, known when the
//! validation plan is compiled. [`FieldValue`] is the value a field holds at
//! validation time. Builders pick their comparison state from the former;
//! constraints check the latter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared value category of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Pointer-width signed integer (`isize`)
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Pointer-width unsigned integer (`usize`)
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Bool,
    Char,
    /// Any type the crate has no category for
    Other,
}

impl ValueKind {
    /// Returns true for the signed integer kinds.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            ValueKind::Int | ValueKind::Int8 | ValueKind::Int16 | ValueKind::Int32 | ValueKind::Int64
        )
    }

    /// Returns true for the unsigned integer kinds.
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            ValueKind::Uint
                | ValueKind::Uint8
                | ValueKind::Uint16
                | ValueKind::Uint32
                | ValueKind::Uint64
        )
    }

    /// Returns true for the floating point kinds.
    pub fn is_float(&self) -> bool {
        matches!(self, ValueKind::Float32 | ValueKind::Float64)
    }

    /// Returns true for any integer or floating point kind.
    pub fn is_numeric(&self) -> bool {
        self.is_signed() || self.is_unsigned() || self.is_float()
    }

    /// Returns the lower-case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Int8 => "int8",
            ValueKind::Int16 => "int16",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Uint => "uint",
            ValueKind::Uint8 => "uint8",
            ValueKind::Uint16 => "uint16",
            ValueKind::Uint32 => "uint32",
            ValueKind::Uint64 => "uint64",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
            ValueKind::Char => "char",
            ValueKind::Other => "other",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The runtime value of a single record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Str(&'a str),
    Bool(bool),
    Char(char),
    /// A value of a type with no category; holds the type name
    Other(&'static str),
}

impl<'a> FieldValue<'a> {
    /// Returns the category of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Int(_) => ValueKind::Int,
            FieldValue::Int8(_) => ValueKind::Int8,
            FieldValue::Int16(_) => ValueKind::Int16,
            FieldValue::Int32(_) => ValueKind::Int32,
            FieldValue::Int64(_) => ValueKind::Int64,
            FieldValue::Uint(_) => ValueKind::Uint,
            FieldValue::Uint8(_) => ValueKind::Uint8,
            FieldValue::Uint16(_) => ValueKind::Uint16,
            FieldValue::Uint32(_) => ValueKind::Uint32,
            FieldValue::Uint64(_) => ValueKind::Uint64,
            FieldValue::Float32(_) => ValueKind::Float32,
            FieldValue::Float64(_) => ValueKind::Float64,
            FieldValue::Str(_) => ValueKind::String,
            FieldValue::Bool(_) => ValueKind::Bool,
            FieldValue::Char(_) => ValueKind::Char,
            FieldValue::Other(_) => ValueKind::Other,
        }
    }

    /// Widens any signed integer to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::Int(v) => i64::try_from(v).ok(),
            FieldValue::Int8(v) => Some(i64::from(v)),
            FieldValue::Int16(v) => Some(i64::from(v)),
            FieldValue::Int32(v) => Some(i64::from(v)),
            FieldValue::Int64(v) => Some(v),
            _ => None,
        }
    }

    /// Widens any unsigned integer to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            FieldValue::Uint(v) => u64::try_from(v).ok(),
            FieldValue::Uint8(v) => Some(u64::from(v)),
            FieldValue::Uint16(v) => Some(u64::from(v)),
            FieldValue::Uint32(v) => Some(u64::from(v)),
            FieldValue::Uint64(v) => Some(v),
            _ => None,
        }
    }

    /// Widens any float to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            FieldValue::Float32(v) => Some(f64::from(v)),
            FieldValue::Float64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string slice for string values.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Int8(v) => write!(f, "{v}"),
            FieldValue::Int16(v) => write!(f, "{v}"),
            FieldValue::Int32(v) => write!(f, "{v}"),
            FieldValue::Int64(v) => write!(f, "{v}"),
            FieldValue::Uint(v) => write!(f, "{v}"),
            FieldValue::Uint8(v) => write!(f, "{v}"),
            FieldValue::Uint16(v) => write!(f, "{v}"),
            FieldValue::Uint32(v) => write!(f, "{v}"),
            FieldValue::Uint64(v) => write!(f, "{v}"),
            FieldValue::Float32(v) => write!(f, "{v}"),
            FieldValue::Float64(v) => write!(f, "{v}"),
            FieldValue::Str(v) => write!(f, "{v:?}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Char(v) => write!(f, "{v:?}"),
            FieldValue::Other(name) => write!(f, "<{name}>"),
        }
    }
}

/// A Rust type usable as a record field.
///
/// Implemented for the primitive integers, floats, `bool`, `char`, `String`
/// and `&str`. Other types can implement it to take part in records; a type
/// that fits no category should report [`ValueKind::Other`].
pub trait FieldType {
    /// The declared category of fields of this type.
    const KIND: ValueKind;

    /// Borrows the current value.
    fn field_value(&self) -> FieldValue<'_>;
}

macro_rules! impl_field_type {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::$kind(*self)
                }
            }
        )*
    };
}

impl_field_type! {
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    char => Char,
}

impl FieldType for String {
    const KIND: ValueKind = ValueKind::String;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self.as_str())
    }
}

impl FieldType for &str {
    const KIND: ValueKind = ValueKind::String;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert!(ValueKind::Int8.is_signed());
        assert!(ValueKind::Uint16.is_unsigned());
        assert!(ValueKind::Float32.is_float());
        assert!(ValueKind::Int.is_numeric());
        assert!(!ValueKind::String.is_numeric());
        assert!(!ValueKind::Bool.is_numeric());
    }

    #[test]
    fn test_field_value_matches_declared_kind() {
        assert_eq!(<i8 as FieldType>::KIND, (-3i8).field_value().kind());
        assert_eq!(<u64 as FieldType>::KIND, 7u64.field_value().kind());
        assert_eq!(<f32 as FieldType>::KIND, 1.5f32.field_value().kind());
        assert_eq!(<String as FieldType>::KIND, "x".to_string().field_value().kind());
        assert_eq!(<bool as FieldType>::KIND, true.field_value().kind());
    }

    #[test]
    fn test_widening() {
        assert_eq!(FieldValue::Int8(-40).as_i64(), Some(-40));
        assert_eq!(FieldValue::Int(12).as_i64(), Some(12));
        assert_eq!(FieldValue::Uint16(40).as_u64(), Some(40));
        assert_eq!(FieldValue::Float32(0.5).as_f64(), Some(0.5));
        assert_eq!(FieldValue::Uint8(1).as_i64(), None);
        assert_eq!(FieldValue::Int64(1).as_u64(), None);
        assert_eq!(FieldValue::Bool(true).as_f64(), None);
        assert_eq!(FieldValue::Str("abc").as_str(), Some("abc"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Uint16.to_string(), "uint16");
        assert_eq!(ValueKind::Float64.to_string(), "float64");
        assert_eq!(serde_json::to_string(&ValueKind::Int8).unwrap(), "\"int8\"");
    }
}
