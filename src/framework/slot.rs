//! # Persistent Slot
//!
//! [`PersistentSlot`] is the generic engine behind the cart: a single-value store that
//! writes through to [`DurableStorage`] on every mutation and broadcasts its current
//! value to any number of [`Subscription`]s.
//!
//! ## Guarantees
//!
//! - **Never fails outward.** Unreadable stored values load as empty; failed writes
//!   are logged and the in-memory value stays authoritative for this process.
//! - **One representation of "empty".** Clearing deletes the storage key.
//! - **Ordered.** Every mutation runs inside the channel's write lock, so storage
//!   writes and observed values follow call order exactly.
//!
//! Subscribers always see the latest value. A subscriber that is slow to poll may
//! skip intermediate values, but never observes an older value after a newer one.

use crate::framework::entity::SlotEntity;
use crate::framework::error::{FrameworkError, SlotRejection, StorageError};
use crate::framework::storage::DurableStorage;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE STORE
// =============================================================================

/// A cloneable handle to one persisted single-value slot.
///
/// All clones share the same value, storage backend and subscribers. The slot lives
/// as long as any handle does.
pub struct PersistentSlot<T: SlotEntity> {
    inner: Arc<SlotInner<T>>,
}

struct SlotInner<T: SlotEntity> {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<Option<T>>,
}

impl<T: SlotEntity> Clone for PersistentSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: SlotEntity> PersistentSlot<T> {
    /// Creates the slot, restoring its value from `storage`.
    ///
    /// This never fails: an absent, unreadable, unparsable or invalid entry
    /// yields an empty slot.
    pub fn load(storage: Arc<dyn DurableStorage>) -> Self {
        let initial = restore::<T>(storage.as_ref());
        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(SlotInner { storage, state }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> Option<T> {
        self.inner.state.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().is_none()
    }

    /// Replaces the value unconditionally.
    ///
    /// A value that fails [`SlotEntity::validate`] is refused and the slot is left
    /// untouched.
    pub fn set(&self, value: T) -> Result<(), SlotRejection<T>> {
        value.validate().map_err(SlotRejection::Invalid)?;
        self.write(Some(value));
        Ok(())
    }

    /// Stores `value` only if the slot is empty.
    ///
    /// On conflict nothing is written and the occupying value is returned.
    pub fn set_if_empty(&self, value: T) -> Result<(), SlotRejection<T>> {
        value.validate().map_err(SlotRejection::Invalid)?;
        let storage = self.inner.storage.as_ref();
        let mut occupied = None;
        self.inner.state.send_if_modified(|slot| {
            if let Some(current) = slot {
                occupied = Some(current.clone());
                return false;
            }
            persist(storage, Some(&value));
            *slot = Some(value);
            true
        });
        match occupied {
            Some(current) => Err(SlotRejection::Occupied(current)),
            None => Ok(()),
        }
    }

    /// Empties the slot and deletes the storage key.
    pub fn clear(&self) {
        self.write(None);
    }

    /// Empties the slot only if `predicate` holds for its current value.
    ///
    /// The check and the clear happen under the same write lock. Returns `true` if
    /// the slot was cleared.
    pub fn clear_if(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        let storage = self.inner.storage.as_ref();
        self.inner.state.send_if_modified(|slot| {
            if !slot.as_ref().is_some_and(predicate) {
                return false;
            }
            persist::<T>(storage, None);
            *slot = None;
            true
        })
    }

    /// Registers a new subscriber. Its first [`Subscription::changed`] resolves on
    /// the next mutation after this call.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.inner.state.subscribe(),
        }
    }

    fn write(&self, next: Option<T>) {
        let storage = self.inner.storage.as_ref();
        self.inner.state.send_if_modified(|slot| {
            persist(storage, next.as_ref());
            let changed = *slot != next;
            *slot = next;
            changed
        });
    }
}

// =============================================================================
// 2. LOAD & WRITE-THROUGH
// =============================================================================

fn restore<T: SlotEntity>(storage: &dyn DurableStorage) -> Option<T> {
    let key = T::STORAGE_KEY;
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "Nothing persisted");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted value, starting empty");
            return None;
        }
    };

    let parsed = serde_json::from_str::<T>(&raw)
        .map_err(|e| e.to_string())
        .and_then(|value| value.validate().map(|()| value));

    match parsed {
        Ok(value) => {
            info!(key, "Restored persisted value");
            Some(value)
        }
        Err(reason) => {
            warn!(key, error = %reason, "Discarding unreadable persisted value");
            if let Err(e) = storage.remove(key) {
                warn!(key, error = %e, "Failed to delete unreadable value");
            }
            None
        }
    }
}

fn persist<T: SlotEntity>(storage: &dyn DurableStorage, value: Option<&T>) {
    let key = T::STORAGE_KEY;
    let result = match value {
        Some(value) => serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| storage.set(key, &raw)),
        None => storage.remove(key),
    };
    match result {
        Ok(()) => debug!(key, present = value.is_some(), "Persisted"),
        Err(e) => warn!(key, error = %e, "Persist failed, keeping in-memory value"),
    }
}

// =============================================================================
// 3. SUBSCRIPTIONS
// =============================================================================

/// A consumer's live view of a [`PersistentSlot`].
pub struct Subscription<T: SlotEntity> {
    receiver: watch::Receiver<Option<T>>,
}

impl<T: SlotEntity> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
        }
    }
}

impl<T: SlotEntity> Subscription<T> {
    /// The slot's value right now.
    pub fn current(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }

    /// Returns `true` if a mutation happened that [`changed`](Self::changed) has not yet yielded.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Waits for the next mutation and returns the value it produced.
    ///
    /// Fails with [`FrameworkError::StoreClosed`] once every store handle is dropped.
    pub async fn changed(&mut self) -> Result<Option<T>, FrameworkError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}
