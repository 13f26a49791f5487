//! [`Encode`] impls for standard library and ecosystem types.
//!
//! - Primitives, strings and byte sequences are leaves.
//! - `&T`, `&mut T`, `Box<T>`, `Rc<T>` and `Arc<T>` are one level of
//!   reference and forward every capability query to the pointee, including
//!   trait objects such as `Box<dyn Encode>`.
//! - `Option<T>` is a nullable slot: `None` is absent and `Some(v)` behaves
//!   exactly like `v`, so `Option<Box<T>>` is still a single reference.
//! - `DateTime<Utc>` and `BigInt` are leaves that also expose text and JSON
//!   capabilities.

use crate::marshal::{BinaryMarshaler, JsonMarshaler, MapMarshaler, TextMarshaler};
use crate::{Encode, Map, Result, Shape, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use std::rc::Rc;
use std::sync::Arc;

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Leaf(Value::from(self.clone()))
                }
            }
        )*
    };
}

impl_leaf!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
impl_leaf!(String, Vec<u8>);

impl Encode for &str {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf(Value::from(*self))
    }
}

impl Encode for &[u8] {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf(Value::from(*self))
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf(Value::from(&self[..]))
    }
}

impl Encode for Value {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf(self.clone())
    }
}

impl Encode for Map {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf(Value::Map(self.clone()))
    }
}

impl Encode for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Absent
    }
}

macro_rules! impl_reference {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Encode + ?Sized> Encode for $ptr {
                fn shape(&self) -> Shape<'_> {
                    Shape::Reference((**self).as_encode())
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn as_map_marshaler(&self) -> Option<&dyn MapMarshaler> {
                    (**self).as_map_marshaler()
                }

                fn as_text_marshaler(&self) -> Option<&dyn TextMarshaler> {
                    (**self).as_text_marshaler()
                }

                fn as_json_marshaler(&self) -> Option<&dyn JsonMarshaler> {
                    (**self).as_json_marshaler()
                }

                fn as_binary_marshaler(&self) -> Option<&dyn BinaryMarshaler> {
                    (**self).as_binary_marshaler()
                }
            }
        )*
    };
}

impl_reference!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: Encode> Encode for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Absent,
        }
    }

    fn as_map_marshaler(&self) -> Option<&dyn MapMarshaler> {
        self.as_ref().and_then(|v| v.as_map_marshaler())
    }

    fn as_text_marshaler(&self) -> Option<&dyn TextMarshaler> {
        self.as_ref().and_then(|v| v.as_text_marshaler())
    }

    fn as_json_marshaler(&self) -> Option<&dyn JsonMarshaler> {
        self.as_ref().and_then(|v| v.as_json_marshaler())
    }

    fn as_binary_marshaler(&self) -> Option<&dyn BinaryMarshaler> {
        self.as_ref().and_then(|v| v.as_binary_marshaler())
    }
}

impl Encode for DateTime<Utc> {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf(Value::Date(*self))
    }

    fn as_text_marshaler(&self) -> Option<&dyn TextMarshaler> {
        Some(self)
    }

    fn as_json_marshaler(&self) -> Option<&dyn JsonMarshaler> {
        Some(self)
    }
}

impl Encode for BigInt {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf(Value::BigInt(self.clone()))
    }

    fn as_text_marshaler(&self) -> Option<&dyn TextMarshaler> {
        Some(self)
    }

    fn as_json_marshaler(&self) -> Option<&dyn JsonMarshaler> {
        Some(self)
    }
}

fn rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl TextMarshaler for DateTime<Utc> {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(rfc3339(self).into_bytes())
    }
}

impl JsonMarshaler for DateTime<Utc> {
    fn marshal_json(&self) -> Result<Vec<u8>> {
        Ok(format!("\"{}\"", rfc3339(self)).into_bytes())
    }
}

impl TextMarshaler for BigInt {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(self.to_string().into_bytes())
    }
}

impl JsonMarshaler for BigInt {
    fn marshal_json(&self) -> Result<Vec<u8>> {
        let fits = i64::try_from(self).is_ok() || u64::try_from(self).is_ok();
        let digits = self.to_string();
        Ok(if fits { digits } else { format!("\"{}\"", digits) }.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_leaf_values() {
        assert!(matches!(5u16.shape(), Shape::Leaf(Value::Number(_))));
        assert!(matches!("s".shape(), Shape::Leaf(Value::String(_))));
        assert!(matches!((&b"ab"[..]).shape(), Shape::Leaf(Value::Bytes(_))));
        assert!(matches!([1u8, 2].shape(), Shape::Leaf(Value::Bytes(_))));
        assert!(matches!(().shape(), Shape::Absent));
    }

    #[test]
    fn test_option_is_transparent() {
        assert!(matches!(Some(1i8).shape(), Shape::Leaf(_)));
        assert!(matches!(None::<i8>.shape(), Shape::Absent));
        assert!(matches!(Some(Box::new(1i8)).shape(), Shape::Reference(_)));
    }

    #[test]
    fn test_reference_forwards_type_name() {
        let boxed: Box<dyn Encode> = Box::new(7u32);
        assert_eq!(boxed.type_name(), "u32");
        assert_eq!(Arc::new(7u32).type_name(), "u32");
    }

    #[test]
    fn test_trait_object_is_one_reference() {
        let boxed: Box<dyn Encode> = Box::new(Box::new(1u8));
        assert!(matches!(boxed.shape(), Shape::Reference(_)));
        assert!(matches!(boxed.shape().resolve(), Shape::Reference(_)));
    }

    #[test]
    fn test_date_capabilities() {
        let date = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let boxed = Box::new(date);
        assert_eq!(
            boxed.as_text_marshaler().unwrap().marshal_text().unwrap(),
            b"2020-01-02T03:04:05Z".to_vec()
        );
        assert_eq!(
            boxed.as_json_marshaler().unwrap().marshal_json().unwrap(),
            br#""2020-01-02T03:04:05Z""#.to_vec()
        );
        assert!(boxed.as_binary_marshaler().is_none());
    }

    #[test]
    fn test_bigint_json_is_quoted_past_64_bits() {
        let small = BigInt::from(-42);
        let large: BigInt = BigInt::from(u64::MAX) + 1;
        assert_eq!(small.marshal_json().unwrap(), b"-42".to_vec());
        assert_eq!(large.marshal_json().unwrap(), br#""18446744073709551616""#.to_vec());
        assert_eq!(large.marshal_text().unwrap(), b"18446744073709551616".to_vec());
    }
}
