use type_inspector::{InspectorError, PositionStore};
use web_sys::Storage;

use crate::error::storage_error;

/// A [`PositionStore`] backed by the page's `localStorage`.
///
/// Pages can deny access to `localStorage` (sandboxed frames, disabled
/// storage). The store then reports [`InspectorError::Storage`] on every call
/// and the overlay falls back to its default position.
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Open the current window's `localStorage`
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten();
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, InspectorError> {
        self.storage
            .as_ref()
            .ok_or_else(|| InspectorError::Storage("localStorage is unavailable".into()))
    }
}

impl PositionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, InspectorError> {
        self.storage()?.get_item(key).map_err(storage_error)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), InspectorError> {
        self.storage()?.set_item(key, &value).map_err(storage_error)
    }
}
