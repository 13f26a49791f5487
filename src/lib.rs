//! # struct_map
//!
//! Tag-driven conversion of Rust records into ordered, string-keyed maps.
//!
//! ## What it does
//!
//! A record describes its fields once (usually with [`impl_record!`]), each
//! with an optional tag string such as `map:"user_id,string"`. [`marshal_map`]
//! walks the fields and produces a [`Map`] from keys to [`Value`]s:
//!
//! - the key is the tag name if it is a valid name, otherwise the field name;
//! - `-` excludes a field, and unexported fields are never emitted;
//! - embedded fields have their own fields promoted into the parent map;
//! - nested records become nested maps, primitives are stored as they are;
//! - the `json`, `string` and `bytes` options turn a nested value into bytes
//!   through its marshaling capabilities.
//!
//! ## Quick Start
//!
//! ```rust
//! use struct_map::{impl_record, marshal_map, Value};
//!
//! struct Address {
//!     city: String,
//! }
//!
//! struct User {
//!     id: u32,
//!     name: String,
//!     password: String,
//!     address: Address,
//!     note: Option<String>,
//! }
//!
//! impl_record! { Address { city => "City" = r#"map:"city""# } }
//!
//! impl_record! {
//!     User {
//!         id => "ID" = r#"map:"id""#,
//!         name => "Name",
//!         password => "Password" = r#"map:"-""#,
//!         address => "Address" = r#"map:"address""#,
//!         note => "Note",
//!     }
//! }
//!
//! let user = User {
//!     id: 7,
//!     name: "Alice".to_string(),
//!     password: "hunter2".to_string(),
//!     address: Address { city: "Oslo".to_string() },
//!     note: None,
//! };
//!
//! let map = marshal_map(&user).unwrap();
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["id", "Name", "address", "Note"]);
//! assert_eq!(map.get("Note"), Some(&Value::Null));
//!
//! let address = map.get("address").and_then(|v| v.as_map()).unwrap();
//! assert_eq!(address.get("city").and_then(|v| v.as_str()), Some("Oslo"));
//! ```
//!
//! ## Tag options
//!
//! Options follow the name, joined by the separator (`,` by default). They
//! only apply to fields that are not primitives, and are checked in this
//! order:
//!
//! | Option   | Result                                                      |
//! |----------|-------------------------------------------------------------|
//! | `json`   | JSON bytes, from [`JsonMarshaler`] or the generic encoder   |
//! | `string` | bytes from Text, then JSON, then Binary marshaler           |
//! | `bytes`  | bytes from Binary, then JSON, then Text marshaler           |
//!
//! ## Custom tag namespace
//!
//! ```rust
//! use struct_map::{impl_record, marshal_map_with_options, EncoderOptions};
//!
//! struct Row {
//!     id: i64,
//! }
//!
//! impl_record! { Row { id => "Id" = r#"db:"row_id""# } }
//!
//! let options = EncoderOptions::new().with_tag("db");
//! let map = marshal_map_with_options(&Row { id: 1 }, options).unwrap();
//! assert!(map.contains_key("row_id"));
//! ```
//!
//! ## Logging
//!
//! The encoder emits `tracing` events: `debug` when a capability or a
//! [`MapMarshaler`] produces a value, `trace` for every skipped field. No
//! subscriber is installed by the library.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Tags, exclusion, nesting and embedding
//! - **`capabilities.rs`** - The `json`, `string` and `bytes` options
//! - **`custom_options.rs`** - Custom tag namespace and separator
//!
//! Run any example with: `cargo run --example <name>`

pub mod encode;
pub mod error;
mod impls;
pub mod json;
pub mod macros;
pub mod map;
pub mod marshal;
pub mod options;
pub mod record;
pub mod ser;
pub mod tag;
pub mod value;

pub use encode::{AsEncode, Encode, Encoder, Shape};
pub use error::{Error, Result};
pub use map::Map;
pub use marshal::{BinaryMarshaler, Capability, JsonMarshaler, MapMarshaler, TextMarshaler};
pub use options::{EncoderOptions, DEFAULT_SEPARATOR, DEFAULT_TAG};
pub use record::{Field, FieldValue, Record};
pub use ser::{to_value, ValueSerializer};
pub use value::{Number, Value};

/// Encode a record into a [`Map`] using the default `map` tag and `,`
/// separator.
///
/// # Examples
///
/// ```rust
/// use struct_map::{impl_record, marshal_map};
///
/// struct Point { x: i32, y: i32 }
///
/// impl_record! { Point { x => "X" = r#"map:"x""#, y => "Y" = r#"map:"y""# } }
///
/// let map = marshal_map(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(map.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the value is not a record,
/// [`Error::MissingMarshaler`] if a `string`/`bytes` field has no usable
/// capability, or any error raised by a capability.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal_map(value: &dyn Encode) -> Result<Map> {
    Encoder::default().marshal_map(value)
}

/// Encode a record into a [`Map`] with a custom tag namespace and separator.
///
/// Empty option strings fall back to [`DEFAULT_TAG`] and [`DEFAULT_SEPARATOR`].
///
/// # Examples
///
/// ```rust
/// use struct_map::{impl_record, marshal_map_with_options, EncoderOptions};
///
/// struct Point { x: i32 }
///
/// impl_record! { Point { x => "X" = r#"col:"pos_x;string""# } }
///
/// let options = EncoderOptions::new().with_tag("col").with_separator(";");
/// let map = marshal_map_with_options(&Point { x: 1 }, options).unwrap();
/// assert!(map.contains_key("pos_x"));
/// ```
///
/// # Errors
///
/// Same as [`marshal_map`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal_map_with_options(value: &dyn Encode, options: EncoderOptions) -> Result<Map> {
    Encoder::new(options).marshal_map(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: u8,
        right: u8,
    }

    impl_record! {
        Pair {
            left => "Left" = r#"map:"l" alt:"left_alt""#,
            right => "Right" = r#"map:"r""#,
        }
    }

    #[test]
    fn test_marshal_map_defaults() {
        let map = marshal_map(&Pair { left: 1, right: 2 }).unwrap();
        assert_eq!(map.get("l"), Some(&Value::from(1u8)));
        assert_eq!(map.get("r"), Some(&Value::from(2u8)));
    }

    #[test]
    fn test_marshal_map_with_options() {
        let options = EncoderOptions::new().with_tag("alt");
        let map = marshal_map_with_options(&Pair { left: 1, right: 2 }, options).unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["left_alt", "Right"]);
    }

    #[test]
    fn test_non_record_is_rejected() {
        let err = marshal_map(&42i32).unwrap_err();
        assert_eq!(err, Error::unsupported_type("i32"));
    }
}
