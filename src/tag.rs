//! Field tag parsing.
//!
//! A field carries one tag string holding any number of namespaces in the
//! conventional `key:"value"` form, separated by spaces:
//!
//! ```text
//! map:"user_id,string" json:"id,omitempty"
//! ```
//!
//! [`StructTag`] extracts the value for one namespace, [`parse_tag`] splits
//! that value into a target key and [`TagOptions`], and [`is_valid_tag`]
//! decides whether the target key is usable or the field name should be used
//! instead.
//!
//! ```rust
//! use struct_map::tag::{is_valid_tag, parse_tag, StructTag};
//!
//! let tag = StructTag::new(r#"map:"user_id,string" json:"id""#);
//! let value = tag.get("map").unwrap();
//! let (name, options) = parse_tag(&value, ",");
//!
//! assert_eq!(name, "user_id");
//! assert!(options.contains("string"));
//! assert!(is_valid_tag(name));
//! ```

use std::borrow::Cow;

/// Characters allowed in a target key besides letters and digits.
const KEY_PUNCTUATION: &str = "!#$%&()*+-./:;<=>?@[]^_{|}~ ";

/// A raw multi-namespace tag string attached to a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StructTag<'a>(&'a str);

impl<'a> StructTag<'a> {
    pub const fn new(raw: &'a str) -> Self {
        StructTag(raw)
    }

    /// Returns the raw tag string.
    pub const fn as_str(&self) -> &'a str {
        self.0
    }

    /// Returns the value stored under `key`, or `None` if the namespace is
    /// absent.
    ///
    /// Scanning stops silently at the first malformed pair, so namespaces
    /// after a syntax error are not found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_map::tag::StructTag;
    ///
    /// let tag = StructTag::new(r#"map:"-" json:"name,omitempty""#);
    /// assert_eq!(tag.get("map").as_deref(), Some("-"));
    /// assert_eq!(tag.get("json").as_deref(), Some("name,omitempty"));
    /// assert_eq!(tag.get("db"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<Cow<'a, str>> {
        let mut rest = self.0;
        while !rest.is_empty() {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let bytes = rest.as_bytes();
            let name_len = bytes
                .iter()
                .position(|&b| b <= b' ' || b == b':' || b == b'"' || b == 0x7f)
                .unwrap_or(bytes.len());
            if name_len == 0
                || name_len + 1 >= bytes.len()
                || bytes[name_len] != b':'
                || bytes[name_len + 1] != b'"'
            {
                break;
            }
            let name = &rest[..name_len];
            rest = &rest[name_len + 1..];

            // `rest` now starts at the opening quote.
            let bytes = rest.as_bytes();
            let mut i = 1;
            while i < bytes.len() && bytes[i] != b'"' {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= bytes.len() {
                break;
            }
            let quoted = &rest[..=i];
            rest = &rest[i + 1..];

            if name == key {
                return unquote(quoted);
            }
        }
        None
    }
}

impl<'a> From<&'a str> for StructTag<'a> {
    fn from(raw: &'a str) -> Self {
        StructTag(raw)
    }
}

fn unquote(quoted: &str) -> Option<Cow<'_, str>> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    if !inner.contains('\\') {
        return Some(Cow::Borrowed(inner));
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            _ => return None,
        }
    }
    Some(Cow::Owned(out))
}

/// The option tokens following the target key in a tag value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagOptions<'a> {
    raw: &'a str,
    separator: &'a str,
}

impl<'a> TagOptions<'a> {
    /// Returns `true` if `option` is one of the tokens.
    pub fn contains(&self, option: &str) -> bool {
        self.iter().any(|token| token == option)
    }

    /// Iterates the option tokens in the order they were written.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let raw = self.raw;
        raw.split(self.separator).filter(move |_| !raw.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Splits a tag value into its target key and options at the first
/// `separator`.
///
/// # Examples
///
/// ```rust
/// use struct_map::tag::parse_tag;
///
/// let (name, options) = parse_tag("data,string,json", ",");
/// assert_eq!(name, "data");
/// assert_eq!(options.iter().collect::<Vec<_>>(), vec!["string", "json"]);
///
/// let (name, options) = parse_tag(",bytes", ",");
/// assert_eq!(name, "");
/// assert!(options.contains("bytes"));
/// ```
pub fn parse_tag<'a>(raw: &'a str, separator: &'a str) -> (&'a str, TagOptions<'a>) {
    let (name, options) = match raw.split_once(separator).filter(|_| !separator.is_empty()) {
        Some((name, options)) => (name, options),
        None => (raw, ""),
    };
    (
        name,
        TagOptions {
            raw: options,
            separator,
        },
    )
}

/// Returns `true` if `name` can be used as a target key.
///
/// # Examples
///
/// ```rust
/// use struct_map::tag::is_valid_tag;
///
/// assert!(is_valid_tag("user_id"));
/// assert!(is_valid_tag("a-b.c"));
/// assert!(!is_valid_tag(""));
/// assert!(!is_valid_tag(" padded"));
/// assert!(!is_valid_tag("quo\"te"));
/// ```
pub fn is_valid_tag(name: &str) -> bool {
    if name.is_empty() || name.starts_with(char::is_whitespace) {
        return false;
    }
    name.chars()
        .all(|c| c.is_alphanumeric() || KEY_PUNCTUATION.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_second_namespace() {
        let tag = StructTag::new(r#"json:"json"  map:"int""#);
        assert_eq!(tag.get("map").as_deref(), Some("int"));
        assert_eq!(tag.get("json").as_deref(), Some("json"));
    }

    #[test]
    fn test_lookup_empty_value() {
        let tag = StructTag::new(r#"map:"""#);
        assert_eq!(tag.get("map").as_deref(), Some(""));
    }

    #[test]
    fn test_lookup_escaped_value() {
        let tag = StructTag::new(r#"map:"a\"b\\c""#);
        assert_eq!(tag.get("map").as_deref(), Some("a\"b\\c"));
        assert!(matches!(tag.get("map"), Some(Cow::Owned(_))));
    }

    #[test]
    fn test_lookup_stops_at_malformed_pair() {
        let tag = StructTag::new(r#"map:int json:"x""#);
        assert_eq!(tag.get("map"), None);
        assert_eq!(tag.get("json"), None);

        let unterminated = StructTag::new(r#"map:"int"#);
        assert_eq!(unterminated.get("map"), None);
    }

    #[test]
    fn test_lookup_bad_escape() {
        let tag = StructTag::new(r#"map:"\q""#);
        assert_eq!(tag.get("map"), None);
    }

    #[test]
    fn test_parse_without_options() {
        let (name, options) = parse_tag("int", ",");
        assert_eq!(name, "int");
        assert!(options.is_empty());
        assert!(!options.contains(""));
        assert_eq!(options.iter().count(), 0);
    }

    #[test]
    fn test_parse_multichar_separator() {
        let (name, options) = parse_tag("key::json::string", "::");
        assert_eq!(name, "key");
        assert!(options.contains("json"));
        assert!(options.contains("string"));
        assert!(!options.contains("bytes"));
    }

    #[test]
    fn test_option_must_match_whole_token() {
        let (_, options) = parse_tag("data,stringify", ",");
        assert!(!options.contains("string"));
    }

    #[test]
    fn test_valid_tag_characters() {
        assert!(is_valid_tag("ключ"));
        assert!(is_valid_tag("-"));
        assert!(is_valid_tag("with space"));
        assert!(!is_valid_tag("back\\slash"));
        assert!(!is_valid_tag("comma,"));
    }
}
