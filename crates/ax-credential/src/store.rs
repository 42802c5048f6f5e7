//! Two-tier credential store with legacy-key migration.

use parking_lot::Mutex;

use crate::backend::{MemoryBackend, StorageBackend};

/// Recognized storage keys.
pub mod keys {
    /// Primary credential key. The only key new writes target.
    pub const PRIMARY: &str = "token";
    /// Legacy credential key. Read-only, kept for migration.
    pub const LEGACY: &str = "authToken";
}

#[derive(Debug, Default)]
struct Overlay {
    /// In-memory credential when no tier could persist it.
    credential: Option<String>,
    /// Whether the last `set` reached durable storage.
    unpersisted: bool,
}

/// Storage of the bearer credential across two persistence tiers.
///
/// Reads prefer the durable tier (it is authoritative when the tiers
/// disagree) and fall back to the legacy key within each tier. Writes
/// target the durable primary key only. All multi-slot operations hold
/// one lock, so callers never observe a half-written state.
pub struct CredentialStore {
    durable: Box<dyn StorageBackend>,
    scoped: Box<dyn StorageBackend>,
    overlay: Mutex<Overlay>,
}

impl CredentialStore {
    /// Creates a store over a durable and a session-scoped tier.
    #[must_use]
    pub fn new(durable: Box<dyn StorageBackend>, scoped: Box<dyn StorageBackend>) -> Self {
        Self {
            durable,
            scoped,
            overlay: Mutex::new(Overlay::default()),
        }
    }

    /// Creates a store backed entirely by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()), Box::new(MemoryBackend::new()))
    }

    /// Reads the active credential, if any.
    ///
    /// Slot order: durable primary, durable legacy, scoped primary,
    /// scoped legacy, then the in-memory overlay. Unavailable tiers are
    /// skipped silently.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        let overlay = self.overlay.lock();
        for (tier, key) in self.slots() {
            match tier.read(key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(err) => tracing::debug!(%err, key, "credential tier read failed"),
            }
        }
        overlay.credential.clone()
    }

    /// Stores a credential in the durable primary slot.
    ///
    /// Returns whether the write persisted. On failure the credential is
    /// kept in a process-local overlay so the session still works for
    /// this page lifetime, and every stored slot is best-effort cleared
    /// so a stale value cannot shadow the overlay.
    pub fn set(&self, credential: &str) -> bool {
        let mut overlay = self.overlay.lock();
        match self.durable.write(keys::PRIMARY, credential) {
            Ok(()) => {
                overlay.credential = None;
                overlay.unpersisted = false;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "credential not persisted; session is in-memory for this page lifetime");
                for (tier, key) in self.slots() {
                    let _ = tier.remove(key);
                }
                overlay.credential = Some(credential.to_owned());
                overlay.unpersisted = true;
                false
            }
        }
    }

    /// Removes the credential from every recognized slot in both tiers.
    ///
    /// Idempotent; clearing an empty store is a no-op. Unavailable tiers
    /// are skipped silently.
    pub fn clear(&self) {
        let mut overlay = self.overlay.lock();
        for (tier, key) in self.slots() {
            if let Err(err) = tier.remove(key) {
                tracing::debug!(%err, key, "credential tier clear failed");
            }
        }
        overlay.credential = None;
        overlay.unpersisted = false;
    }

    /// Whether the stored credential survives a page reload.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        !self.overlay.lock().unpersisted
    }

    fn slots(&self) -> [(&dyn StorageBackend, &'static str); 4] {
        [
            (self.durable.as_ref(), keys::PRIMARY),
            (self.durable.as_ref(), keys::LEGACY),
            (self.scoped.as_ref(), keys::PRIMARY),
            (self.scoped.as_ref(), keys::LEGACY),
        ]
    }
}
