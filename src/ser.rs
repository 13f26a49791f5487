//! Conversion of serde values into [`Value`].
//!
//! Most fields are described through [`Record`](crate::Record) and the
//! [`Encode`](crate::Encode) impls, but collections, enums and foreign types
//! usually already implement [`Serialize`]. [`ValueSerializer`] turns any of
//! them into a [`Value`], which is what [`Field::serialized`](crate::Field::serialized)
//! stores for a serde-backed leaf.
//!
//! ```rust
//! use struct_map::{to_value, Value};
//!
//! let value = to_value(&vec!["a", "b"]).unwrap();
//! assert_eq!(value, Value::Array(vec![Value::from("a"), Value::from("b")]));
//! ```
//!
//! Enum variants carrying data become single-entry maps keyed by the variant
//! name, the same externally tagged layout `serde_json` uses.

use crate::{Error, Map, Number, Result, Value};
use serde::{ser, Serialize};

/// A serializer producing [`Value`]s instead of text.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: &'static str,
    map: Map,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(Number::Unsigned(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::with_capacity(1);
        map.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: Map::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.name.to_string(), Value::Array(self.vec));
        Ok(Value::Map(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value(key)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(Error::custom("map keys must be strings")),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.name.to_string(), Value::Map(self.map));
        Ok(Value::Map(map))
    }
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Errors
///
/// Returns an error if the value's `Serialize` impl fails or produces a map
/// whose keys are not strings, numbers or booleans.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Pair(u8, u8),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));

        let circle = to_value(&Shape::Circle(1.5)).unwrap();
        assert_eq!(
            circle.as_map().and_then(|m| m.get("Circle")),
            Some(&Value::from(1.5f64))
        );

        let pair = to_value(&Shape::Pair(1, 2)).unwrap();
        assert_eq!(
            pair.as_map().and_then(|m| m.get("Pair")),
            Some(&Value::Array(vec![Value::from(1u8), Value::from(2u8)]))
        );

        let rect = to_value(&Shape::Rect { w: 3, h: 4 }).unwrap();
        let inner = rect.as_map().and_then(|m| m.get("Rect")).unwrap();
        assert_eq!(inner.as_map().and_then(|m| m.get("h")), Some(&Value::from(4u32)));
    }

    #[test]
    fn test_numeric_map_keys_become_strings() {
        let mut source = BTreeMap::new();
        source.insert(1u32, "one");
        source.insert(2u32, "two");
        let value = to_value(&source).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("1"), Some(&Value::from("one")));
        assert_eq!(map.get("2"), Some(&Value::from("two")));
    }

    #[test]
    fn test_bytes_stay_bytes() {
        struct Raw<'a>(&'a [u8]);

        impl Serialize for Raw<'_> {
            fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_bytes(self.0)
            }
        }

        assert_eq!(to_value(&Raw(b"ab")).unwrap(), Value::Bytes(b"ab".to_vec()));
    }

    #[test]
    fn test_option_and_unit() {
        assert_eq!(to_value(&None::<u8>).unwrap(), Value::Null);
        assert_eq!(to_value(&Some(3i16)).unwrap(), Value::from(3i16));
        assert_eq!(to_value(&()).unwrap(), Value::Null);
    }
}
