//! In-memory credential store.

use super::CredentialStore;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    token: SecretString,
    expires_at: Option<Instant>,
}

/// Process-local [`CredentialStore`] holding a single token with optional
/// expiry. Suitable for hosts without durable credential storage and for
/// tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entry: Mutex<Option<Entry>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with a token, without expiry.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(SecretString::from(token.into()), None);
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Entry>> {
        self.entry
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<SecretString> {
        let mut slot = self.lock();
        match slot.as_ref() {
            Some(entry) => {
                if entry.expires_at.is_some_and(|at| Instant::now() >= at) {
                    *slot = None;
                    None
                } else {
                    Some(SecretString::from(entry.token.expose_secret()))
                }
            }
            None => None,
        }
    }

    fn set(&self, token: SecretString, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        *self.lock() = Some(Entry { token, expires_at });
    }

    fn remove(&self) {
        *self.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().is_none());
        store.set(SecretString::from("tok-1"), None);
        assert_eq!(store.get().map(|t| t.expose_secret().to_string()), Some("tok-1".into()));
        store.remove();
        assert!(store.get().is_none());
    }

    #[test]
    fn expired_token_is_absent() {
        let store = MemoryCredentialStore::new();
        store.set(SecretString::from("tok"), Some(Duration::ZERO));
        assert!(store.get().is_none());
    }
}
