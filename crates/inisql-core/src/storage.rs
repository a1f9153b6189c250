//! Persistence boundary.
//!
//! The interpreter never touches a backing medium directly; it is handed a
//! [`StoreAdapter`] that moves whole [`Store`]s in and out.

use crate::store::{KeyCase, Store};
use crate::Result;

/// Loads a [`Store`] from a backing medium and persists it back.
pub trait StoreAdapter: Send {
    /// Read the full store from the backing medium
    fn load(&mut self) -> Result<Store>;

    /// Replace the backing medium's contents with `store`
    fn save(&mut self, store: &Store) -> Result<()>;

    /// Key normalization statements must apply to match what `load` produces
    fn key_case(&self) -> KeyCase {
        KeyCase::default()
    }
}

/// Adapter that keeps the last saved store in memory.
///
/// Useful for tests and throwaway interpreters.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    saved: Store,
    saves: u64,
    key_case: KeyCase,
}

impl MemoryAdapter {
    /// Creates an adapter with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter whose first `load` returns `store`.
    pub fn with_store(store: Store) -> Self {
        Self {
            saved: store,
            ..Self::default()
        }
    }

    /// Sets the key normalization reported to statements.
    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    /// The store as of the last save.
    pub fn saved(&self) -> &Store {
        &self.saved
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> u64 {
        self.saves
    }
}

impl StoreAdapter for MemoryAdapter {
    fn load(&mut self) -> Result<Store> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, store: &Store) -> Result<()> {
        self.saved = store.clone();
        self.saves += 1;
        Ok(())
    }

    fn key_case(&self) -> KeyCase {
        self.key_case
    }
}

impl<A: StoreAdapter + ?Sized> StoreAdapter for Box<A> {
    fn load(&mut self) -> Result<Store> {
        (**self).load()
    }

    fn save(&mut self, store: &Store) -> Result<()> {
        (**self).save(store)
    }

    fn key_case(&self) -> KeyCase {
        (**self).key_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_adapter_round_trip() {
        let mut store = Store::new();
        store.add_section("s").unwrap();
        store.set_value("s", "k", "v").unwrap();

        let mut adapter = MemoryAdapter::new();
        adapter.save(&store).unwrap();

        assert_eq!(adapter.load().unwrap(), store);
        assert_eq!(adapter.save_count(), 1);
    }
}
