//! `localStorage`-backed key-value store.

use fotg_editor_core::{KeyValueStore, StorageError};
use gloo_storage::{LocalStorage, Storage};

use crate::dom::js_message;

/// Plain-string access to `window.localStorage`.
///
/// Values are stored unencoded through `LocalStorage::raw()`, not gloo's
/// JSON-typed accessors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::new(key, js_message(&e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| StorageError::new(key, js_message(&e)))
    }
}
