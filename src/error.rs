//! Error types for map encoding.
//!
//! Encoding is a pure traversal, so every failure is either a shape the
//! encoder cannot walk, a tag option the value cannot satisfy, or an error
//! raised by one of the value's own marshaling capabilities.
//!
//! ## Error Categories
//!
//! - **Unsupported types**: the top-level value is not a record
//! - **Missing marshalers**: a `string`/`bytes` tagged field has no capability
//! - **JSON errors**: the generic JSON encoder failed
//! - **Custom errors**: raised by user capability implementations
//!
//! ## Examples
//!
//! ```rust
//! use struct_map::{marshal_map, Error};
//!
//! let err = marshal_map(&42i32).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedType(_)));
//! assert!(err.to_string().contains("i32"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a value into a map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The value is not a record and has no map-marshaling capability
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A `string` or `bytes` tagged field implements none of the capabilities
    /// its option needs
    #[error("field: {field} with '{option}' tag does not implement {expected}")]
    MissingMarshaler {
        field: String,
        option: &'static str,
        expected: &'static str,
    },

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error naming the offending type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_map::Error;
    ///
    /// let err = Error::unsupported_type("i32");
    /// assert_eq!(err.to_string(), "unsupported type: i32");
    /// ```
    pub fn unsupported_type(type_name: &str) -> Self {
        Error::UnsupportedType(type_name.to_string())
    }

    /// Creates a missing marshaler error for `field` tagged with `option`.
    ///
    /// `expected` lists the capabilities in the order they were tried.
    pub fn missing_marshaler(field: &str, option: &'static str, expected: &'static str) -> Self {
        Error::MissingMarshaler {
            field: field.to_string(),
            option,
            expected,
        }
    }

    /// Creates a JSON error.
    pub fn json<T: fmt::Display>(msg: T) -> Self {
        Error::Json(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// Capability implementations use this to report their own failures; the
    /// encoder hands the error back to the caller untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_map::Error;
    ///
    /// let err = Error::custom("clock not set");
    /// assert!(err.to_string().contains("clock not set"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_marshaler_message() {
        let err = Error::missing_marshaler(
            "Data",
            "string",
            "TextMarshaler/JsonMarshaler/BinaryMarshaler",
        );
        assert_eq!(
            err.to_string(),
            "field: Data with 'string' tag does not implement TextMarshaler/JsonMarshaler/BinaryMarshaler"
        );
    }

    #[test]
    fn test_serde_custom_is_custom() {
        let err = <Error as serde::ser::Error>::custom("boom");
        assert_eq!(err, Error::Custom("boom".to_string()));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Json(_)));
    }
}
