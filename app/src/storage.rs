//! `localStorage` persistence for the signed-in session.
//!
//! Outside the browser (server rendering, native tests) there is no storage:
//! loads return `None` and writes are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const SESSION_KEY: &str = "youride.session";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn save<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        tracing::warn!("localStorage unavailable, session not persisted");
        return;
    };
    match serde_json::to_string(value) {
        Ok(json) => {
            check_write("write", key, storage.set_item(key, &json));
        }
        Err(e) => tracing::warn!("Failed to serialize {}: {}", key, e),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    serde_json::from_str(&json)
        .map_err(|e| tracing::warn!("Discarding unreadable {}: {}", key, e))
        .ok()
}

#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    match local_storage() {
        Some(storage) => {
            check_write("remove", key, storage.remove_item(key));
        }
        None => tracing::warn!("localStorage unavailable, {} not removed", key),
    }
}

/// Log a failed storage change. Returns whether it went through.
pub fn check_write<E: std::fmt::Debug>(action: &str, key: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to {} {} in localStorage: {:?}", action, key, e);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save<T: Serialize>(_key: &str, _value: &T) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn load<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(_key: &str) {}
