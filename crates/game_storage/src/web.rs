//! Browser `localStorage` backend (wasm32 only).

use anyhow::{anyhow, Result};

use crate::store::KeyValueStore;

#[derive(Debug, Default, Clone, Copy)]
pub struct WebStore;

impl WebStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let storage = Self::storage().ok_or_else(|| anyhow!("localStorage unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage.setItem failed: {e:?}"))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let storage = Self::storage().ok_or_else(|| anyhow!("localStorage unavailable"))?;
        storage
            .remove_item(key)
            .map_err(|e| anyhow!("localStorage.removeItem failed: {e:?}"))
    }

    fn describe(&self) -> String {
        "localStorage".into()
    }
}
