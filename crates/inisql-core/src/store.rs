//! In-memory data model: a [`Store`] of named [`Section`]s holding string entries.
//!
//! Both levels keep insertion order so a store written back to its backing
//! medium keeps the layout it was loaded with.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How option keys are normalized before they are stored or looked up.
///
/// Section names are never normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCase {
    /// Fold keys to lowercase, so `Workgroup` and `workgroup` name the same option
    #[default]
    Lower,
    /// Keep keys verbatim and compare them case-sensitively
    Preserve,
}

impl KeyCase {
    /// Normalized form of `key`.
    pub fn normalize<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self {
            KeyCase::Lower if key.chars().any(char::is_uppercase) => Cow::Owned(key.to_lowercase()),
            _ => Cow::Borrowed(key),
        }
    }
}

/// An ordered set of key/value entries. Values are always text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    entries: IndexMap<String, String>,
}

impl Section {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites an entry. Returns the previous value, if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Option<String>> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::InvalidInput("Key cannot be empty".to_string()));
        }
        Ok(self.entries.insert(key, value.into()))
    }

    /// Removes an entry, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrows the underlying mapping.
    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.entries
    }
}

/// Ordered mapping from section name to [`Section`].
///
/// Section names and keys are never empty. The store compares both
/// verbatim; key folding is applied by whoever feeds it (see [`KeyCase`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    sections: IndexMap<String, Section>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the named section exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Adds an empty section. Returns `false` if it already existed.
    pub fn add_section(&mut self, name: impl Into<String>) -> Result<bool> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidInput("Section name cannot be empty".to_string()));
        }
        if self.sections.contains_key(&name) {
            return Ok(false);
        }
        self.sections.insert(name, Section::new());
        Ok(true)
    }

    /// Removes a section with all of its entries.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Borrows a section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Mutably borrows a section.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Reads a single value.
    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Writes a single value into an existing section.
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) -> Result<Option<String>> {
        let target = self
            .sections
            .get_mut(section)
            .ok_or_else(|| Error::NotFound(section.to_string()))?;
        target.set(key, value)
    }

    /// Removes a single key. Returns `false` if the section or key was absent.
    pub fn remove_option(&mut self, section: &str, key: &str) -> bool {
        self.sections
            .get_mut(section)
            .and_then(|s| s.remove(key))
            .is_some()
    }

    /// Iterates sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_section_is_idempotent() {
        let mut store = Store::new();
        assert!(store.add_section("global").unwrap());
        assert!(!store.add_section("global").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_names_rejected() {
        let mut store = Store::new();
        assert!(store.add_section("").is_err());
        store.add_section("s").unwrap();
        assert!(store.set_value("s", "", "v").is_err());
    }

    #[test]
    fn test_set_value_requires_section() {
        let mut store = Store::new();
        let err = store.set_value("missing", "k", "v").unwrap_err();
        assert!(matches!(err, Error::NotFound(ref s) if s == "missing"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut section = Section::new();
        section.set("a", "1").unwrap();
        section.set("b", "2").unwrap();
        section.set("c", "3").unwrap();
        section.remove("b");

        let keys: Vec<&str> = section.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_key_case_normalize() {
        assert_eq!(KeyCase::Lower.normalize("Workgroup"), "workgroup");
        assert_eq!(KeyCase::Lower.normalize("server string"), "server string");
        assert!(matches!(KeyCase::Lower.normalize("log"), Cow::Borrowed(_)));
        assert_eq!(KeyCase::Preserve.normalize("Workgroup"), "Workgroup");
        assert_eq!(KeyCase::default(), KeyCase::Lower);
    }

    #[test]
    fn test_remove_option() {
        let mut store = Store::new();
        store.add_section("s").unwrap();
        store.set_value("s", "k", "v").unwrap();

        assert!(store.remove_option("s", "k"));
        assert!(!store.remove_option("s", "k"));
        assert!(!store.remove_option("missing", "k"));
        assert_eq!(store.get_value("s", "k"), None);
    }
}
