//! Per-key async locks.
//!
//! Serializes read-modify-write cycles on the same sample ID while different
//! IDs proceed in parallel. Entries are removed once nobody holds or waits on
//! them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A key's mutex plus the number of callers holding or waiting on it.
#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    users: usize,
}

type Entries = Arc<Mutex<HashMap<String, Slot>>>;

/// A set of async mutexes addressed by string key.
#[derive(Debug, Clone, Default)]
pub struct KeyedLocks {
    entries: Entries,
}

/// Holds the lock for one key until dropped.
pub struct KeyGuard {
    // Fields drop in order: the mutex is released before the claim.
    _guard: OwnedMutexGuard<()>,
    _claim: Claim,
}

/// Counts one user of a key from the moment it starts waiting. Dropping it,
/// whether the wait finished or was cancelled, prunes the entry once the
/// count reaches zero.
struct Claim {
    key: String,
    entries: Entries,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`.
    pub async fn lock(&self, key: &str) -> KeyGuard {
        let (claim, mutex) = self.claim(key);
        let guard = mutex.lock_owned().await;

        KeyGuard {
            _guard: guard,
            _claim: claim,
        }
    }

    fn claim(&self, key: &str) -> (Claim, Arc<AsyncMutex<()>>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = entries.entry(key.to_string()).or_default();
        slot.users += 1;

        let claim = Claim {
            key: key.to_string(),
            entries: Arc::clone(&self.entries),
        };
        (claim, Arc::clone(&slot.mutex))
    }

    /// Number of keys currently tracked.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = entries.get_mut(&self.key) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                entries.remove(&self.key);
            }
        }
    }
}
