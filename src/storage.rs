use clock_core::{KeyValueStore, MemoryStore, StoreError};
use web_sys as web;

/// `sessionStorage`, with an in-memory copy for writes the browser refuses
/// (private mode, quota) so a reminder is never spoken twice in a page's life.
pub struct SessionStore {
    storage: Option<web::Storage>,
    fallback: MemoryStore,
}

impl SessionStore {
    pub fn from_window(window: &web::Window) -> Self {
        let storage = match window.session_storage() {
            Ok(Some(s)) => Some(s),
            Ok(None) => {
                log::warn!("[ledger] no sessionStorage, reminders reset on reload");
                None
            }
            Err(e) => {
                log::warn!("[ledger] sessionStorage blocked: {:?}", e);
                None
            }
        };
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

impl KeyValueStore for SessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.fallback.get_item(key).or_else(|| {
            self.storage
                .as_ref()
                .and_then(|s| s.get_item(key).ok().flatten())
        })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let Some(storage) = &self.storage else {
            return self.fallback.set_item(key, value);
        };
        if let Err(e) = storage.set_item(key, value) {
            self.fallback.set_item(key, value)?;
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            });
        }
        Ok(())
    }
}
