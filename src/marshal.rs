//! Marshaling capabilities a value may expose to the encoder.
//!
//! A type opts into a capability by implementing the trait and returning
//! `Some(self)` from the matching `Encode::as_*_marshaler` query (the
//! [`impl_record!`](crate::impl_record) macro does this for you with its
//! `capabilities [...]` list). Reference wrappers such as `Box<T>`, `&T` and
//! `Option<T>` forward the queries to the value they point at.
//!
//! | Capability          | Used for                                         |
//! |---------------------|--------------------------------------------------|
//! | [`MapMarshaler`]    | replaces the whole record traversal              |
//! | [`TextMarshaler`]   | first choice for `string`, last for `bytes`      |
//! | [`JsonMarshaler`]   | `json`, and second choice for `string`/`bytes`   |
//! | [`BinaryMarshaler`] | first choice for `bytes`, last for `string`      |

use crate::{Encode, Map, Result};

/// Produces the encoded map directly, bypassing field traversal.
pub trait MapMarshaler {
    fn marshal_map(&self) -> Result<Map>;
}

/// Produces a textual representation of the value.
pub trait TextMarshaler {
    fn marshal_text(&self) -> Result<Vec<u8>>;
}

/// Produces the JSON encoding of the value.
pub trait JsonMarshaler {
    fn marshal_json(&self) -> Result<Vec<u8>>;
}

/// Produces an opaque binary encoding of the value.
pub trait BinaryMarshaler {
    fn marshal_binary(&self) -> Result<Vec<u8>>;
}

/// One of the byte-producing capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Text,
    Json,
    Binary,
}

impl Capability {
    /// Capabilities tried for the `string` tag option, in order.
    pub const STRING_ORDER: [Capability; 3] =
        [Capability::Text, Capability::Json, Capability::Binary];

    /// Capabilities tried for the `bytes` tag option, in order.
    pub const BYTES_ORDER: [Capability; 3] =
        [Capability::Binary, Capability::Json, Capability::Text];

    pub const fn trait_name(self) -> &'static str {
        match self {
            Capability::Text => "TextMarshaler",
            Capability::Json => "JsonMarshaler",
            Capability::Binary => "BinaryMarshaler",
        }
    }

    /// Runs this capability on `value`, or returns `None` if the value does
    /// not expose it.
    pub fn marshal(self, value: &dyn Encode) -> Option<Result<Vec<u8>>> {
        match self {
            Capability::Text => value.as_text_marshaler().map(|m| m.marshal_text()),
            Capability::Json => value.as_json_marshaler().map(|m| m.marshal_json()),
            Capability::Binary => value.as_binary_marshaler().map(|m| m.marshal_binary()),
        }
    }

    /// Runs the first capability in `order` that `value` exposes.
    pub fn first_available(order: &[Capability], value: &dyn Encode) -> Option<Result<Vec<u8>>> {
        order.iter().find_map(|capability| capability.marshal(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Shape};

    struct TextAndBinary;

    impl TextMarshaler for TextAndBinary {
        fn marshal_text(&self) -> Result<Vec<u8>> {
            Ok(b"text".to_vec())
        }
    }

    impl BinaryMarshaler for TextAndBinary {
        fn marshal_binary(&self) -> Result<Vec<u8>> {
            Err(Error::custom("binary failed"))
        }
    }

    impl Encode for TextAndBinary {
        fn shape(&self) -> Shape<'_> {
            Shape::Absent
        }

        fn as_text_marshaler(&self) -> Option<&dyn TextMarshaler> {
            Some(self)
        }

        fn as_binary_marshaler(&self) -> Option<&dyn BinaryMarshaler> {
            Some(self)
        }
    }

    #[test]
    fn test_string_order_prefers_text() {
        let out = Capability::first_available(&Capability::STRING_ORDER, &TextAndBinary);
        assert_eq!(out, Some(Ok(b"text".to_vec())));
    }

    #[test]
    fn test_bytes_order_prefers_binary_and_keeps_its_error() {
        let out = Capability::first_available(&Capability::BYTES_ORDER, &TextAndBinary);
        assert_eq!(out, Some(Err(Error::custom("binary failed"))));
    }

    #[test]
    fn test_no_capability() {
        assert!(Capability::first_available(&Capability::STRING_ORDER, &1u8).is_none());
    }
}
