//! Dynamic value representation for encoded fields.
//!
//! This module provides the [`Value`] enum stored in every [`Map`] the encoder
//! returns. Leaf fields keep their natural representation (signed and unsigned
//! integers stay distinct, byte sequences stay bytes), nested records become
//! [`Value::Map`], and capability-encoded fields become [`Value::Bytes`].
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use struct_map::Value;
//!
//! let null = Value::Null;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let bytes = Value::from(vec![1u8, 2, 3]);
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use struct_map::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! assert!(value.is_number());
//!
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::Map;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of one encoded field.
///
/// # Examples
///
/// ```rust
/// use struct_map::{Value, Number};
///
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(Value::Null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(Map),
    Date(DateTime<Utc>),
    BigInt(BigInt),
}

/// A numeric value, keeping signed, unsigned and floating point apart.
///
/// # Examples
///
/// ```rust
/// use struct_map::Number;
///
/// assert_eq!(Number::Integer(-3).as_i64(), Some(-3));
/// assert_eq!(Number::Unsigned(u64::MAX).as_i64(), None);
/// assert_eq!(Number::Unsigned(u64::MAX).as_u64(), Some(u64::MAX));
/// assert_eq!(Number::Float(2.5).as_f64(), 2.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is a signed or unsigned integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Unsigned(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is an integer that fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Integer(i) => Some(i),
            Number::Unsigned(u) => i64::try_from(u).ok(),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to a `u64` if it is a non-negative integer.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::Integer(i) => u64::try_from(i).ok(),
            Number::Unsigned(u) => Some(u),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to an `f64`, possibly losing precision.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Unsigned(u) => u as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

macro_rules! impl_from_number {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::$variant(value as $wide)
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_number!(Integer as i64: i8, i16, i32, i64, isize);
impl_from_number!(Unsigned as u64: u8, u16, u32, u64, usize);
impl_from_number!(Float as f64: f32, f64);

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a byte sequence.
    #[inline]
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a nested map.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_map::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer that fits in an `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a non-negative integer, returns it as a `u64`.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a byte sequence, returns a reference to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_map::Value;
    ///
    /// assert_eq!(Value::from(b"abc".to_vec()).as_bytes(), Some(&b"abc"[..]));
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a nested map, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a date, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a big integer, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(bi) => Some(bi),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(bytes) => write!(f, "{:?}", bytes),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Map(map) => {
                write!(
                    f,
                    "{{{}}}",
                    map.iter()
                        .map(|(k, v)| format!("{:?}:{}", k, v))
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Date(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::BigInt(bi) => write!(f, "{}", bi),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Value::Array(arr) => serializer.collect_seq(arr),
            Value::Map(map) => map.serialize(serializer),
            Value::Date(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::BigInt(bi) => serializer.collect_str(bi),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::custom(format!("expected i64, found {:?}", value)))
    }
}

impl TryFrom<Value> for u64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_u64()
            .ok_or_else(|| crate::Error::custom(format!("expected u64, found {:?}", value)))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::custom(format!("expected number, found {:?}", value)))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bytes(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bytes, found {:?}",
                value
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_signed_and_unsigned_stay_apart() {
        assert_eq!(Value::from(-5i8), Value::Number(Number::Integer(-5)));
        assert_eq!(Value::from(5u8), Value::Number(Number::Unsigned(5)));
        assert_ne!(Value::from(5u8), Value::from(5i8));
    }

    #[test]
    fn test_tryfrom_integers() {
        assert_eq!(i64::try_from(Value::from(42u32)).unwrap(), 42);
        assert!(i64::try_from(Value::from(u64::MAX)).is_err());
        assert_eq!(u64::try_from(Value::from(u64::MAX)).unwrap(), u64::MAX);
        assert!(u64::try_from(Value::from(-1)).is_err());
        assert!(i64::try_from(Value::from("42")).is_err());
    }

    #[test]
    fn test_tryfrom_other_leaves() {
        assert_eq!(f64::try_from(Value::from(3.5f64)).unwrap(), 3.5);
        assert!(bool::try_from(Value::from(true)).unwrap());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert_eq!(
            Vec::<u8>::try_from(Value::from(vec![1u8, 2])).unwrap(),
            vec![1, 2]
        );
        assert!(String::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_serialize_to_json() {
        let mut map = Map::new();
        map.insert("n".to_string(), Value::from(1u8));
        map.insert("big".to_string(), Value::from(BigInt::from(7)));
        map.insert("list".to_string(), Value::from(vec![Value::Null, Value::from(false)]));
        let json = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(json, r#"{"n":1,"big":"7","list":[null,false]}"#);
    }

    #[test]
    fn test_display() {
        let mut map = Map::new();
        map.insert("a".to_string(), Value::from("x"));
        assert_eq!(Value::Map(map).to_string(), r#"{"a":"x"}"#);
        assert_eq!(Value::from(-1).to_string(), "-1");
    }
}
