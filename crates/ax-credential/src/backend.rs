//! Storage tier abstraction.

use std::collections::HashMap;

use parking_lot::Mutex;

use ax_core::{Error, Result};

/// A single key-value persistence tier (durable or session-scoped).
///
/// Implementations must be thread-safe. Operations are synchronous and
/// expected to be cheap; the credential store does no retries.
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the tier is unavailable.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the tier is unavailable.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` if present. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the tier is unavailable.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory tier backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty tier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.lock().remove(key);
        Ok(())
    }
}

/// A tier that always fails, modeling storage being unavailable
/// (private browsing, denied quota).
#[derive(Debug, Default)]
pub struct UnavailableBackend;

impl StorageBackend for UnavailableBackend {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Storage("storage tier unavailable".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Storage("storage tier unavailable".into()))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::Storage("storage tier unavailable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_round_trips() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read("token").unwrap(), None);
        backend.write("token", "abc").unwrap();
        assert_eq!(backend.read("token").unwrap().as_deref(), Some("abc"));
        backend.remove("token").unwrap();
        assert_eq!(backend.read("token").unwrap(), None);
    }

    #[test]
    fn removing_absent_key_is_ok() {
        let backend = MemoryBackend::new();
        assert!(backend.remove("missing").is_ok());
    }

    #[test]
    fn unavailable_backend_fails_every_operation() {
        let backend = UnavailableBackend;
        assert!(matches!(backend.read("token"), Err(Error::Storage(_))));
        assert!(matches!(backend.write("token", "abc"), Err(Error::Storage(_))));
        assert!(matches!(backend.remove("token"), Err(Error::Storage(_))));
    }
}
