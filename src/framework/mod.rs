//! Generic persisted single-slot store.
//!
//! This module provides the building blocks the cart is built from: a value slot that
//! writes through to durable storage and broadcasts changes to subscribers.
//!
//! # Main Components
//!
//! - [`SlotEntity`] - Trait that values implement to be held by a slot
//! - [`PersistentSlot`] - The store: current value, mutators, subscriptions
//! - [`Subscription`] - A consumer's reactive view of a slot
//! - [`DurableStorage`] - Synchronous key-value persistence ([`FileStorage`], [`MemoryStorage`])
//! - [`FrameworkError`], [`StorageError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for a storage backend with scripted failures.

pub mod entity;
pub mod error;
pub mod mock;
pub mod slot;
pub mod storage;

pub use entity::SlotEntity;
pub use error::{FrameworkError, SlotRejection, StorageError};
pub use slot::{PersistentSlot, Subscription};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
