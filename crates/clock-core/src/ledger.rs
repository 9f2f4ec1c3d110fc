//! Session-scoped record of which reminders have already been spoken.

use crate::constants::ANNOUNCED_SENTINEL;
use crate::error::StoreError;
use fnv::FnvHashMap;

/// String key/value storage with session lifetime (`sessionStorage` in the browser).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store; used when the platform has no session storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: FnvHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Tracks announced `(title, threshold)` pairs. Entries are never removed.
pub struct ReminderLedger<S> {
    store: S,
}

impl<S: KeyValueStore> ReminderLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[inline]
    pub fn key(title: &str, threshold_minutes: i64) -> String {
        format!("{title}-{threshold_minutes}")
    }

    pub fn mark_announced(&mut self, title: &str, threshold_minutes: i64) -> Result<(), StoreError> {
        let key = Self::key(title, threshold_minutes);
        self.store.set_item(&key, ANNOUNCED_SENTINEL)?;
        log::debug!("[ledger] marked {key}");
        Ok(())
    }

    pub fn is_announced(&self, title: &str, threshold_minutes: i64) -> bool {
        self.store
            .get_item(&Self::key(title, threshold_minutes))
            .is_some_and(|v| v == ANNOUNCED_SENTINEL)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_title_and_threshold() {
        assert_eq!(ReminderLedger::<MemoryStore>::key("Lab 2", 30), "Lab 2-30");
    }

    #[test]
    fn unmarked_is_not_announced() {
        let ledger = ReminderLedger::new(MemoryStore::new());
        assert!(!ledger.is_announced("Lab 2", 30));
    }

    #[test]
    fn marking_twice_stays_announced() {
        let mut ledger = ReminderLedger::new(MemoryStore::new());
        ledger.mark_announced("Lab 2", 30).unwrap();
        ledger.mark_announced("Lab 2", 30).unwrap();
        assert!(ledger.is_announced("Lab 2", 30));
        assert_eq!(ledger.store().len(), 1);
    }

    #[test]
    fn other_values_do_not_count() {
        let mut store = MemoryStore::new();
        store.set_item("Lab 2-15", "yes").unwrap();
        store.set_item("Lab 2-5", "").unwrap();
        let ledger = ReminderLedger::new(store);
        assert!(!ledger.is_announced("Lab 2", 15));
        assert!(!ledger.is_announced("Lab 2", 5));
    }

    #[test]
    fn titles_are_separate_namespaces() {
        let mut ledger = ReminderLedger::new(MemoryStore::new());
        ledger.mark_announced("Lab 2", 30).unwrap();
        assert!(!ledger.is_announced("Lab 3", 30));
        assert!(!ledger.is_announced("Lab 2", 15));
    }
}
