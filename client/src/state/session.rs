//! Session context holding the persisted auth token and user info.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is created once in `App` and handed to both the route guard
//! and the API client, so neither reaches for a global slot directly. In the
//! browser the entries live in `localStorage`; on the server and in tests an
//! in-memory store stands in.
//!
//! TRADE-OFFS
//! ==========
//! Storage writes are best-effort. A browser that refuses `localStorage`
//! access degrades to "not logged in" rather than failing the caller.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the opaque user info blob saved at login.
pub const USER_INFO_KEY: &str = "user_info";

/// Key-value slot backing a [`Session`].
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local store used during SSR and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }
}

/// Browser `localStorage` store.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl SessionStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Cloneable handle over the token slot.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    /// Session backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Session backed by `localStorage` in the browser, in-memory elsewhere.
    pub fn browser() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::new(LocalStorage)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::in_memory()
        }
    }

    /// Current bearer token. An empty stored value counts as absent.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn user_info(&self) -> Option<String> {
        self.store.get(USER_INFO_KEY)
    }

    /// Persist the token (and optional user info) after a successful login.
    pub fn login(&self, token: &str, user_info: Option<&str>) {
        self.store.set(TOKEN_KEY, token);
        match user_info {
            Some(info) => self.store.set(USER_INFO_KEY, info),
            None => self.store.remove(USER_INFO_KEY),
        }
    }

    /// Drop both persisted entries. Used by logout and on `401`.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_INFO_KEY);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
