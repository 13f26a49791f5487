//! Generic JSON encoding for the `json` tag option.
//!
//! A field tagged `json` whose value has no [`JsonMarshaler`](crate::JsonMarshaler)
//! is written with [`to_json`], which walks the value through [`JsonView`], a
//! [`Serialize`] adapter over any [`Encode`] value:
//!
//! - a `JsonMarshaler` is trusted for its own bytes (they must parse as JSON),
//!   then a `TextMarshaler` becomes a JSON string;
//! - records become objects keyed by the `json` tag namespace, following the
//!   same export, `-`, embedding and name rules as map encoding, plus
//!   `omitempty`;
//! - byte sequences become standard base64 strings, dates RFC 3339 strings,
//!   big integers numbers when they fit in 64 bits and strings otherwise.
//!
//! ```rust
//! use struct_map::{impl_record, json::to_json};
//!
//! struct Point {
//!     x: i32,
//!     label: Option<String>,
//!     raw: Vec<u8>,
//! }
//!
//! impl_record! {
//!     Point {
//!         x => "X" = r#"json:"x""#,
//!         label => "Label" = r#"json:"label,omitempty""#,
//!         raw => "Raw",
//!     }
//! }
//!
//! let point = Point { x: 3, label: None, raw: b"hi".to_vec() };
//! let json = to_json(&point).unwrap();
//! assert_eq!(json, br#"{"x":3,"Raw":"aGk="}"#.to_vec());
//! ```

use crate::record::FieldValue;
use crate::tag::{is_valid_tag, parse_tag};
use crate::{to_value, Encode, Number, Record, Result, Shape, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::SecondsFormat;
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

const JSON_TAG: &str = "json";
const JSON_SEPARATOR: &str = ",";

/// Encodes `value` as JSON, preferring its own [`JsonMarshaler`](crate::JsonMarshaler).
///
/// # Errors
///
/// Returns the marshaler's error unchanged, or [`Error::Json`](crate::Error::Json)
/// if the generic encoding fails.
pub fn to_json(value: &dyn Encode) -> Result<Vec<u8>> {
    if let Some(marshaler) = value.as_json_marshaler() {
        return marshaler.marshal_json();
    }
    Ok(serde_json::to_vec(&JsonView(value))?)
}

/// Serializes an [`Encode`] value with JSON conventions.
#[derive(Clone, Copy)]
pub struct JsonView<'a>(pub &'a dyn Encode);

impl Serialize for JsonView<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0;
        if let Some(marshaler) = value.as_json_marshaler() {
            let bytes = marshaler.marshal_json().map_err(S::Error::custom)?;
            let parsed: serde_json::Value =
                serde_json::from_slice(&bytes).map_err(S::Error::custom)?;
            return parsed.serialize(serializer);
        }
        if let Some(marshaler) = value.as_text_marshaler() {
            let bytes = marshaler.marshal_text().map_err(S::Error::custom)?;
            return serializer.serialize_str(&String::from_utf8_lossy(&bytes));
        }

        match value.shape() {
            Shape::Absent => serializer.serialize_unit(),
            Shape::Leaf(leaf) => JsonLeaf(&leaf).serialize(serializer),
            Shape::Reference(inner) => JsonView(inner).serialize(serializer),
            Shape::Record(record) => {
                let mut entries = IndexMap::new();
                collect_fields(record, &mut entries).map_err(S::Error::custom)?;

                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, entry) in &entries {
                    map.serialize_entry(key, entry)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Entry<'a> {
    View(&'a dyn Encode),
    Serialized(&'a dyn erased_serde::Serialize),
}

impl Entry<'_> {
    fn is_empty(&self) -> Result<bool> {
        match *self {
            Entry::View(value) => Ok(match value.shape().resolve() {
                Shape::Absent => true,
                Shape::Leaf(leaf) => is_empty_value(&leaf),
                Shape::Record(_) | Shape::Reference(_) => false,
            }),
            Entry::Serialized(value) => Ok(is_empty_value(&to_value(value)?)),
        }
    }
}

impl Serialize for Entry<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Entry::View(value) => JsonView(value).serialize(serializer),
            Entry::Serialized(value) => {
                let value = to_value(value).map_err(S::Error::custom)?;
                JsonLeaf(&value).serialize(serializer)
            }
        }
    }
}

fn collect_fields<'a>(record: &'a dyn Record, entries: &mut IndexMap<String, Entry<'a>>) -> Result<()> {
    for field in record.fields() {
        if field.is_embedded() {
            if let FieldValue::Encode(value) = field.value() {
                let promotable =
                    value.as_json_marshaler().is_none() && value.as_text_marshaler().is_none();
                match (promotable, value.shape().resolve()) {
                    (_, Shape::Absent) => continue,
                    (true, Shape::Record(inner)) => {
                        collect_fields(inner, entries)?;
                        continue;
                    }
                    _ => {}
                }
            }
        }
        if !field.is_exported() {
            continue;
        }

        let tag = field.tag().get(JSON_TAG);
        let tag = tag.as_deref().unwrap_or("");
        if tag == "-" {
            continue;
        }
        let (name, options) = parse_tag(tag, JSON_SEPARATOR);
        let key = if is_valid_tag(name) { name } else { field.name() };

        let entry = match field.value() {
            FieldValue::Encode(value) => Entry::View(value),
            FieldValue::Serialized(value) => Entry::Serialized(value),
        };
        if options.contains("omitempty") && entry.is_empty()? {
            continue;
        }
        entries.insert(key.to_string(), entry);
    }
    Ok(())
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == 0.0,
        Value::String(s) => s.is_empty(),
        Value::Bytes(b) => b.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Map(map) => map.is_empty(),
        Value::Date(_) | Value::BigInt(_) => false,
    }
}

struct JsonLeaf<'a>(&'a Value);

impl Serialize for JsonLeaf<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Value::Bytes(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            Value::Array(arr) => serializer.collect_seq(arr.iter().map(JsonLeaf)),
            Value::Map(map) => serializer.collect_map(map.iter().map(|(k, v)| (k, JsonLeaf(v)))),
            Value::Date(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::BigInt(bi) => serialize_bigint(bi, serializer),
            Value::Number(Number::Float(f)) if !f.is_finite() => Err(S::Error::custom(
                format!("unsupported value: {}", f),
            )),
            other => other.serialize(serializer),
        }
    }
}

fn serialize_bigint<S: Serializer>(bi: &BigInt, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if let Ok(i) = i64::try_from(bi) {
        serializer.serialize_i64(i)
    } else if let Ok(u) = u64::try_from(bi) {
        serializer.serialize_u64(u)
    } else {
        serializer.collect_str(bi)
    }
}
