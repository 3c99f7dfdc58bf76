//! # SlotEntity Trait
//!
//! The contract a value must satisfy to live in a [`PersistentSlot`](crate::framework::PersistentSlot).
//!
//! A slot holds **zero or one** value. The trait pins down everything the slot needs
//! to know about that value: how it is keyed in durable storage, how it is
//! (de)serialized, and how a freshly loaded value is checked before it is trusted.
//!
//! # Provided Methods (Hooks)
//! - [`SlotEntity::validate`] runs on every value written to the slot and on every
//!   value restored from storage, so anything the slot accepts reloads intact. The
//!   default accepts everything. On load, `Err` makes the slot treat the stored entry
//!   exactly like an unparsable one; on write, the value is refused.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait that any value must implement to be held by a [`PersistentSlot`](crate::framework::PersistentSlot).
pub trait SlotEntity:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The fixed key under which the value is persisted.
    const STORAGE_KEY: &'static str;

    /// Checks a value before it is placed in the slot, whether written or restored.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
