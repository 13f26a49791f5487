//! Field registration for record types.
//!
//! Rust has no runtime reflection, so a record lists its fields once through
//! [`Record::fields`]. Each [`Field`] carries what the encoder needs to know:
//! the declared name, the raw tag string, whether the field is exported,
//! whether it is embedded (its own fields are promoted into the parent) and
//! whether its declared type is open (see [`Field::dynamic`]).
//!
//! Most types use the [`impl_record!`](crate::impl_record) macro; writing the
//! impl by hand looks like this:
//!
//! ```rust
//! use struct_map::{marshal_map, Encode, Field, Record, Shape};
//!
//! struct Account {
//!     id: u64,
//!     email: String,
//!     password_hash: String,
//!     tags: Vec<String>,
//! }
//!
//! impl Record for Account {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("Id", &self.id).with_tag(r#"map:"id""#),
//!             Field::new("Email", &self.email),
//!             Field::new("password_hash", &self.password_hash).private(),
//!             Field::serialized("Tags", &self.tags).with_tag(r#"map:"tags""#),
//!         ]
//!     }
//! }
//!
//! impl Encode for Account {
//!     fn shape(&self) -> Shape<'_> {
//!         Shape::Record(self)
//!     }
//! }
//!
//! let account = Account {
//!     id: 9,
//!     email: "a@example.com".to_string(),
//!     password_hash: "x".to_string(),
//!     tags: vec!["admin".to_string()],
//! };
//! let map = marshal_map(&account).unwrap();
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["id", "Email", "tags"]);
//! ```

use crate::tag::StructTag;
use crate::Encode;

/// A value with a fixed, named set of fields.
pub trait Record {
    /// Returns the fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Where a field's value comes from.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// A value the encoder walks itself.
    Encode(&'a dyn Encode),
    /// A serde value, always stored as a leaf.
    Serialized(&'a dyn erased_serde::Serialize),
}

/// Describes one field of a [`Record`] for the duration of a traversal.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    tag: StructTag<'a>,
    exported: bool,
    embedded: bool,
    dynamic: bool,
    value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// Creates an exported, untagged field.
    pub fn new(name: &'a str, value: &'a dyn Encode) -> Self {
        Field {
            name,
            tag: StructTag::default(),
            exported: true,
            embedded: false,
            dynamic: false,
            value: FieldValue::Encode(value),
        }
    }

    /// Creates an exported, untagged field whose value is converted through
    /// serde, for collections, enums and foreign types.
    pub fn serialized<T: serde::Serialize>(name: &'a str, value: &'a T) -> Self {
        Field {
            name,
            tag: StructTag::default(),
            exported: true,
            embedded: false,
            dynamic: false,
            value: FieldValue::Serialized(value),
        }
    }

    /// Attaches a tag string such as `map:"key,string" json:"key"`.
    #[must_use]
    pub fn with_tag(mut self, tag: &'a str) -> Self {
        self.tag = StructTag::new(tag);
        self
    }

    /// Marks the field as not exported.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Marks the field as embedded.
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Marks the field as holding a value of any type, typically a
    /// `Box<dyn Encode>`.
    ///
    /// A dynamic field is never stored raw on the strength of its current
    /// contents: a primitive inside it still goes through the `json`, `string`
    /// and `bytes` options, and with none of them it is rejected as
    /// [`Error::UnsupportedType`](crate::Error::UnsupportedType).
    #[must_use]
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn tag(&self) -> StructTag<'a> {
        self.tag
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn value(&self) -> FieldValue<'a> {
        self.value
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self.value {
            FieldValue::Encode(value) => value.type_name(),
            FieldValue::Serialized(_) => "serde",
        };
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag.as_str())
            .field("exported", &self.exported)
            .field("embedded", &self.embedded)
            .field("dynamic", &self.dynamic)
            .field("value", &value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let value = 5u8;
        let field = Field::new("Count", &value)
            .with_tag(r#"map:"count""#)
            .private()
            .embedded()
            .dynamic();

        assert_eq!(field.name(), "Count");
        assert_eq!(field.tag().get("map").as_deref(), Some("count"));
        assert!(!field.is_exported());
        assert!(field.is_embedded());
        assert!(field.is_dynamic());
        assert!(matches!(field.value(), FieldValue::Encode(_)));
    }

    #[test]
    fn test_serialized_field() {
        let tags = vec!["a".to_string()];
        let field = Field::serialized("Tags", &tags);
        assert!(field.is_exported());
        assert!(!field.is_embedded());
        assert!(!field.is_dynamic());
        assert!(matches!(field.value(), FieldValue::Serialized(_)));
        assert!(format!("{:?}", field).contains("serde"));
    }
}
