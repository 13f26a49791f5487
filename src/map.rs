//! Ordered map type returned by the encoder.
//!
//! This module provides [`Map`], a wrapper around [`IndexMap`] that keeps
//! entries in the order the encoder produced them, which is field declaration
//! order with embedded fields promoted in place.
//!
//! Inserting an existing key replaces its value but keeps its original
//! position, which is how later fields win key collisions without reordering
//! the result.
//!
//! ## Examples
//!
//! ```rust
//! use struct_map::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// An ordered map of string keys to encoded values.
///
/// # Examples
///
/// ```rust
/// use struct_map::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<String, crate::Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the entry keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_map::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// assert_eq!(map.get("key").and_then(|v| v.as_i64()), Some(43));
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains a value for the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key from the map, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl Serialize for Map {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl From<HashMap<String, crate::Value>> for Map {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl From<Map> for HashMap<String, crate::Value> {
    fn from(map: Map) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for Map {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, crate::Value)> for Map {
    fn extend<T: IntoIterator<Item = (String, crate::Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_extend_overwrites_in_place() {
        let mut map: Map = vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
        ]
        .into_iter()
        .collect();
        map.extend(vec![
            ("a".to_string(), Value::from(10)),
            ("c".to_string(), Value::from(3)),
        ]);

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(map.get("a").and_then(|v| v.as_i64()), Some(10));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: Map = ["x", "y", "z"]
            .iter()
            .map(|k| (k.to_string(), Value::Null))
            .collect();
        assert!(map.remove("y").is_some());
        assert!(!map.contains_key("y"));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "z"]);
    }

    #[test]
    fn test_serializes_as_json_object() {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::from("Alice"));
        map.insert("age".to_string(), Value::from(30));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"name":"Alice","age":30}"#);
    }
}
