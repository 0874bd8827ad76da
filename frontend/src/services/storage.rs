use shared::PreferenceStore;
use web_sys::Storage;

use super::logging::Logger;

/// `localStorage`-backed preferences. Values are stored as plain strings.
/// Without storage access (private mode, sandboxed frames) reads return
/// nothing and writes are dropped.
pub struct LocalPreferenceStore {
    storage: Option<Storage>,
}

impl LocalPreferenceStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            Logger::warn_with_component("Storage", "localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalPreferenceStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                Logger::warn_with_component("Storage", &format!("Failed to persist {key}"));
            }
        }
    }
}
