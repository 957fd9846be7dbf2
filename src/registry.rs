//! Insertion-ordered memoization table.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Registry Layout                          │
//! │                                                                  │
//! │   map: FxHashMap<Value, (usize, Value)>    keys: Vec<Value>      │
//! │        key → (index, result)                insertion order      │
//! │                                                                  │
//! │   ┌──────────┬─────────────┐               ┌─────┬─────┬─────┐   │
//! │   │   Key    │ (idx, val)  │               │  0  │  1  │  2  │   │
//! │   ├──────────┼─────────────┤               ├─────┼─────┼─────┤   │
//! │   │   "a"    │ (0, 0.41)   │──────────────►│ "a" │ "b" │ [x] │   │
//! │   │   "b"    │ (1, 0.93)   │               └─────┴─────┴─────┘   │
//! │   │   [x]    │ (2, 0.07)   │                                     │
//! │   └──────────┴─────────────┘                                     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time   | Notes                                       |
//! |-------------|--------|---------------------------------------------|
//! | `get`       | O(1)   | HashMap lookup                              |
//! | `insert`    | O(1)*  | *Amortized; updates keep their position     |
//! | `contains`  | O(1)   | HashMap lookup only                         |
//! | `remove`    | O(n)   | Shifts later keys to keep insertion order   |
//! | `clear`     | O(n)   | Drops every entry                           |
//!
//! ## Example Usage
//!
//! ```
//! use rerandom::registry::Registry;
//! use rerandom::value::Value;
//!
//! let mut registry = Registry::new();
//! registry.insert("b".into(), 0.5.into());
//! registry.insert("a".into(), 0.25.into());
//!
//! assert!(registry.has(&"a".into()));
//! let keys: Vec<String> = registry.keys().map(|k| k.to_string()).collect();
//! assert_eq!(keys, ["b", "a"]);
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Mapping from normalized key to memoized result, iterated in insertion
/// order.
#[derive(Clone, Default)]
pub struct Registry {
    /// Maps key to (index in keys vec, value)
    map: FxHashMap<Value, (usize, Value)>,
    /// Keys in insertion order
    keys: Vec<Value>,
}

impl Registry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value for `key`.
    #[inline]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.map.get(key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` has a stored value.
    #[inline]
    pub fn contains(&self, key: &Value) -> bool {
        self.map.contains_key(key)
    }

    /// Alias of [`contains`](Self::contains).
    #[inline]
    pub fn has(&self, key: &Value) -> bool {
        self.contains(key)
    }

    /// Inserts or updates an entry, returning the previous value.
    ///
    /// An update keeps the key at its original position.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if let Some((_, v)) = self.map.get_mut(&key) {
            return Some(std::mem::replace(v, value));
        }

        let idx = self.keys.len();
        self.keys.push(key.clone());
        self.map.insert(key, (idx, value));

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    /// Removes an entry, returning its value.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let (idx, value) = self.map.remove(key)?;
        self.keys.remove(idx);
        for moved in &self.keys[idx..] {
            if let Some((i, _)) = self.map.get_mut(moved) {
                *i -= 1;
            }
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();
        Some(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.map.clear();
        self.keys.clear();
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.keys.iter()
    }

    /// Values in key insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.iter().map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.keys
            .iter()
            .filter_map(|k| self.map.get(k).map(|(_, v)| (k, v)))
    }

    #[cfg(any(test, debug_assertions))]
    fn validate_invariants(&self) {
        debug_assert_eq!(self.map.len(), self.keys.len());
        for (i, key) in self.keys.iter().enumerate() {
            debug_assert!(matches!(self.map.get(key), Some((idx, _)) if *idx == i));
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Extend<(Value, Value)> for Registry {
    fn extend<I: IntoIterator<Item = (Value, Value)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl FromIterator<(Value, Value)> for Registry {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut registry = Registry::new();
        registry.extend(iter);
        registry
    }
}
