//! Configuration options for map encoding.
//!
//! [`EncoderOptions`] selects which tag namespace the encoder reads and which
//! separator splits a tag value into its target key and options.
//!
//! ## Examples
//!
//! ```rust
//! use struct_map::{impl_record, marshal_map_with_options, EncoderOptions};
//!
//! struct Row {
//!     id: u32,
//! }
//!
//! impl_record! {
//!     Row {
//!         id => "Id" = r#"map:"id" db:"row_id;string""#,
//!     }
//! }
//!
//! let options = EncoderOptions::new().with_tag("db").with_separator(";");
//! let map = marshal_map_with_options(&Row { id: 7 }, options).unwrap();
//! assert_eq!(map.get("row_id").and_then(|v| v.as_u64()), Some(7));
//! ```

/// The tag namespace read when none is configured.
pub const DEFAULT_TAG: &str = "map";

/// The separator between a tag's target key and its options when none is configured.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Configuration options for the [`Encoder`](crate::Encoder).
///
/// Empty strings are never used as-is: the encoder substitutes
/// [`DEFAULT_TAG`] and [`DEFAULT_SEPARATOR`] for them.
///
/// # Examples
///
/// ```rust
/// use struct_map::EncoderOptions;
///
/// let options = EncoderOptions::new();
/// assert_eq!(options.tag, "map");
/// assert_eq!(options.separator, ",");
///
/// let options = EncoderOptions::new().with_tag("db").with_separator(";");
/// assert_eq!(options.tag, "db");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderOptions {
    pub tag: String,
    pub separator: String,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            tag: DEFAULT_TAG.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl EncoderOptions {
    /// Creates default options (`map` tag, `,` separator).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tag namespace to read, e.g. `"db"` for `db:"column"`.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the separator between the target key and the tag options.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Returns these options with empty values replaced by the defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_map::EncoderOptions;
    ///
    /// let options = EncoderOptions::new().with_tag("").with_separator("").normalized();
    /// assert_eq!(options, EncoderOptions::default());
    /// ```
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.tag.is_empty() {
            self.tag = DEFAULT_TAG.to_string();
        }
        if self.separator.is_empty() {
            self.separator = DEFAULT_SEPARATOR.to_string();
        }
        self
    }
}
