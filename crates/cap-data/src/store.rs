//! Hierarchical key-path storage for recorded series.
//!
//! Keys look like file-system paths: `"charge/cycle_1/voltage"`. The
//! [`KeyPathStore`] trait is the seam where a persistent backend plugs in;
//! [`MemoryStore`] is the in-process implementation.

use indexmap::IndexMap;

use crate::error::DataError;

/// Separator between key path segments.
pub const KEY_SEPARATOR: char = '/';

/// Whether writing an existing key is allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Writing an existing key fails with [`DataError::KeyExists`].
    #[default]
    Exclusive,
    /// Writing an existing key replaces it.
    Overwrite,
}

/// Storage of numeric sequences under hierarchical key paths.
pub trait KeyPathStore {
    /// Store `values` under `key`.
    fn write(&mut self, key: &str, values: &[f64]) -> Result<(), DataError>;

    /// The values stored under `key`.
    fn read(&self, key: &str) -> Result<&[f64], DataError>;

    /// `true` if `key` holds a value.
    fn contains(&self, key: &str) -> bool;

    /// The mode governing writes to existing keys.
    fn write_mode(&self) -> WriteMode;
}

pub(crate) fn validate_key(key: &str) -> Result<(), DataError> {
    if key.split(KEY_SEPARATOR).any(str::is_empty) {
        return Err(DataError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// An in-memory [`KeyPathStore`] preserving write order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    mode: WriteMode,
    entries: IndexMap<String, Vec<f64>>,
}

impl MemoryStore {
    /// Create an empty store with the given write mode.
    pub fn new(mode: WriteMode) -> Self {
        Self {
            mode,
            entries: IndexMap::new(),
        }
    }

    /// All keys, in first-write order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys directly or indirectly below `prefix`.
    pub fn keys_under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.keys().filter(move |k| {
            k.strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(KEY_SEPARATOR))
        })
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyPathStore for MemoryStore {
    fn write(&mut self, key: &str, values: &[f64]) -> Result<(), DataError> {
        validate_key(key)?;
        if self.mode == WriteMode::Exclusive && self.entries.contains_key(key) {
            return Err(DataError::KeyExists {
                key: key.to_string(),
            });
        }
        self.entries.insert(key.to_string(), values.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<&[f64], DataError> {
        self.entries
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::MissingKey {
                key: key.to_string(),
            })
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn write_mode(&self) -> WriteMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_store_rejects_rewrites() {
        let mut store = MemoryStore::new(WriteMode::Exclusive);
        store.write("a/b", &[1.0]).unwrap();
        assert_eq!(
            store.write("a/b", &[2.0]),
            Err(DataError::KeyExists {
                key: "a/b".to_string()
            })
        );
        assert_eq!(store.read("a/b").unwrap(), &[1.0]);
    }

    #[test]
    fn overwrite_store_replaces() {
        let mut store = MemoryStore::new(WriteMode::Overwrite);
        store.write("a/b", &[1.0]).unwrap();
        store.write("a/b", &[2.0, 3.0]).unwrap();
        assert_eq!(store.read("a/b").unwrap(), &[2.0, 3.0]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn invalid_and_missing_keys() {
        let mut store = MemoryStore::default();
        assert!(matches!(
            store.write("a//b", &[]),
            Err(DataError::InvalidKey { .. })
        ));
        assert!(matches!(store.write("", &[]), Err(DataError::InvalidKey { .. })));
        assert!(matches!(store.read("nope"), Err(DataError::MissingKey { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn keys_under_matches_whole_segments() {
        let mut store = MemoryStore::default();
        store.write("run/time", &[]).unwrap();
        store.write("run/voltage", &[]).unwrap();
        store.write("runner/time", &[]).unwrap();
        let keys: Vec<&str> = store.keys_under("run").collect();
        assert_eq!(keys, vec!["run/time", "run/voltage"]);
    }
}
