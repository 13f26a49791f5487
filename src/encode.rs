//! The map encoder.
//!
//! [`Encoder::marshal_map`] walks a value described by [`Encode`] and builds a
//! [`Map`]:
//!
//! 1. A value exposing [`MapMarshaler`] is delegated to as a whole.
//! 2. Anything else must be a record, after following at most one reference.
//! 3. Each field is skipped, promoted (embedded), or converted and stored
//!    under its tag key or its declared name.
//!
//! Field conversion looks at the field's shape after one reference:
//!
//! - leaves are stored as they are, unless the field is
//!   [dynamic](crate::Field::dynamic);
//! - records, nested references, absent values and anything in a dynamic
//!   field honor the tag options in the fixed order `json`, `string`, `bytes`,
//!   and otherwise recurse into a nested [`Value::Map`].
//!
//! ```rust
//! use struct_map::{impl_record, marshal_map, Value};
//!
//! struct Inner {
//!     name: String,
//! }
//!
//! struct Outer {
//!     id: i32,
//!     secret: String,
//!     inner: Inner,
//! }
//!
//! impl_record! { Inner { name => "Name" } }
//! impl_record! {
//!     Outer {
//!         id => "Id" = r#"map:"id""#,
//!         secret => "Secret" = r#"map:"-""#,
//!         inner => "Inner",
//!     }
//! }
//!
//! let outer = Outer {
//!     id: 1,
//!     secret: "hidden".to_string(),
//!     inner: Inner { name: "nested".to_string() },
//! };
//! let map = marshal_map(&outer).unwrap();
//!
//! assert_eq!(map.get("id"), Some(&Value::from(1)));
//! assert!(!map.contains_key("Secret"));
//! let inner = map.get("Inner").and_then(|v| v.as_map()).unwrap();
//! assert_eq!(inner.get("Name").and_then(|v| v.as_str()), Some("nested"));
//! ```

use crate::marshal::{BinaryMarshaler, Capability, JsonMarshaler, MapMarshaler, TextMarshaler};
use crate::record::{Field, FieldValue};
use crate::tag::{is_valid_tag, parse_tag, TagOptions};
use crate::{json, to_value, EncoderOptions, Error, Map, Record, Result, Value};
use tracing::{debug, trace};

/// The structural shape of a value, as far as the encoder is concerned.
pub enum Shape<'a> {
    /// No value: `None`, `()`.
    Absent,
    /// A primitive stored as-is.
    Leaf(Value),
    /// A value with named fields.
    Record(&'a dyn Record),
    /// One level of indirection to another value.
    Reference(&'a dyn Encode),
}

impl<'a> Shape<'a> {
    /// Follows one level of indirection, if any.
    pub fn resolve(self) -> Shape<'a> {
        match self {
            Shape::Reference(inner) => inner.shape(),
            shape => shape,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Shape::Record(_))
    }
}

impl std::fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Absent => f.write_str("Absent"),
            Shape::Leaf(value) => f.debug_tuple("Leaf").field(value).finish(),
            Shape::Record(_) => f.write_str("Record"),
            Shape::Reference(inner) => f.debug_tuple("Reference").field(&inner.type_name()).finish(),
        }
    }
}

/// Views any sized [`Encode`] value, or a `dyn Encode`, as a trait object.
///
/// Implemented for every sized `Encode` type; there is no need to implement
/// it by hand.
pub trait AsEncode {
    fn as_encode(&self) -> &dyn Encode;
}

impl<T: Encode> AsEncode for T {
    fn as_encode(&self) -> &dyn Encode {
        self
    }
}

/// A value the encoder can inspect.
///
/// `shape` is the only required method. The `as_*_marshaler` queries expose
/// optional capabilities and default to `None`.
pub trait Encode: AsEncode {
    fn shape(&self) -> Shape<'_>;

    /// Name used in [`Error::UnsupportedType`].
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_map_marshaler(&self) -> Option<&dyn MapMarshaler> {
        None
    }

    fn as_text_marshaler(&self) -> Option<&dyn TextMarshaler> {
        None
    }

    fn as_json_marshaler(&self) -> Option<&dyn JsonMarshaler> {
        None
    }

    fn as_binary_marshaler(&self) -> Option<&dyn BinaryMarshaler> {
        None
    }
}

/// Encodes records into [`Map`]s using one tag namespace and separator.
///
/// An `Encoder` holds no state besides its options; it can be shared and
/// reused freely.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    /// Creates an encoder, substituting defaults for empty options.
    pub fn new(options: EncoderOptions) -> Self {
        Encoder {
            options: options.normalized(),
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encodes `value` into a map.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedType`] if `value` is neither absent nor a record
    ///   (after one reference) and has no [`MapMarshaler`].
    /// - [`Error::MissingMarshaler`] if a `string`/`bytes` field has no usable
    ///   capability.
    /// - Any error returned by a capability, unchanged.
    pub fn marshal_map(&self, value: &dyn Encode) -> Result<Map> {
        if let Some(marshaler) = value.as_map_marshaler() {
            debug!(ty = value.type_name(), "delegating to MapMarshaler");
            return marshaler.marshal_map();
        }

        let record = match value.shape() {
            Shape::Absent => return Ok(Map::new()),
            Shape::Record(record) => record,
            Shape::Reference(inner) => match inner.shape() {
                Shape::Absent => return Ok(Map::new()),
                Shape::Record(record) => record,
                _ => return Err(Error::unsupported_type(inner.type_name())),
            },
            Shape::Leaf(_) => return Err(Error::unsupported_type(value.type_name())),
        };
        self.encode_record(record)
    }

    fn encode_record(&self, record: &dyn Record) -> Result<Map> {
        let fields = record.fields();
        let mut map = Map::with_capacity(fields.len());

        for field in &fields {
            if field.is_embedded() {
                self.promote_embedded(field, &mut map)?;
                continue;
            }
            if !field.is_exported() {
                trace!(field = field.name(), "skipping unexported field");
                continue;
            }

            let tag = field.tag().get(&self.options.tag);
            let tag = tag.as_deref().unwrap_or("");
            if tag == "-" {
                trace!(field = field.name(), "skipping excluded field");
                continue;
            }

            let (name, options) = parse_tag(tag, &self.options.separator);
            let key = if is_valid_tag(name) { name } else { field.name() };
            let value = self.encode_field(field, options)?;
            map.insert(key.to_string(), value);
        }

        Ok(map)
    }

    fn promote_embedded(&self, field: &Field<'_>, map: &mut Map) -> Result<()> {
        match field.value() {
            FieldValue::Encode(value) => {
                if !field.is_exported() && !value.shape().resolve().is_record() {
                    trace!(field = field.name(), "skipping unexported embedded non-record");
                    return Ok(());
                }
                map.extend(self.marshal_map(value)?);
            }
            FieldValue::Serialized(value) => match to_value(value)? {
                Value::Map(nested) => map.extend(nested),
                _ if !field.is_exported() => {
                    trace!(field = field.name(), "skipping unexported embedded non-record");
                }
                _ => return Err(Error::unsupported_type(field.name())),
            },
        }
        Ok(())
    }

    fn encode_field(&self, field: &Field<'_>, options: TagOptions<'_>) -> Result<Value> {
        let value = match field.value() {
            FieldValue::Encode(value) => value,
            FieldValue::Serialized(value) => return to_value(value),
        };

        let shape = match value.shape().resolve() {
            Shape::Leaf(leaf) if !field.is_dynamic() => return Ok(leaf),
            shape => shape,
        };

        if options.contains("json") {
            return json::to_json(value).map(Value::Bytes);
        }
        if options.contains("string") {
            return marshal_bytes(field, value, "string");
        }
        if options.contains("bytes") {
            return marshal_bytes(field, value, "bytes");
        }

        match shape {
            Shape::Absent => Ok(Value::Null),
            _ => self.marshal_map(value).map(Value::Map),
        }
    }
}

fn marshal_bytes(field: &Field<'_>, value: &dyn Encode, option: &'static str) -> Result<Value> {
    let (order, expected) = match option {
        "string" => (
            Capability::STRING_ORDER,
            "TextMarshaler/JsonMarshaler/BinaryMarshaler",
        ),
        _ => (
            Capability::BYTES_ORDER,
            "BinaryMarshaler/JsonMarshaler/TextMarshaler",
        ),
    };

    match Capability::first_available(&order, value) {
        Some(bytes) => {
            debug!(field = field.name(), option, "encoded through capability");
            bytes.map(Value::Bytes)
        }
        None => Err(Error::missing_marshaler(field.name(), option, expected)),
    }
}
