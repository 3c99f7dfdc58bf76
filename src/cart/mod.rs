//! # Cart Store
//!
//! The persistent single-item cart.
//!
//! [`CartStore`] wraps a [`PersistentSlot<CartItem>`] and exposes the cart's vocabulary:
//! `current_item`, `add_to_cart`, `remove_from_cart`, `clear_cart`. It is created once
//! at application start and handed (cloned) to every consumer.
//!
//! ## The One-Device Rule
//!
//! [`CartStore::add_to_cart`] overwrites unconditionally. Callers that want the
//! product rule "one device per order" enforced atomically use
//! [`CartStore::try_add_to_cart`], which refuses while the cart is occupied.
//!
//! ## Failure Semantics
//!
//! No method here returns a storage error. A corrupt entry loads as an empty cart, a
//! failed write is logged, and the in-memory item remains the truth for this run.
//! The load-time checks also gate writes, so an item the cart accepts always
//! survives a restart.

pub mod entity;
pub mod error;

pub use entity::CART_STORAGE_KEY;
pub use error::*;

use crate::framework::{DurableStorage, PersistentSlot, SlotRejection, Subscription};
use crate::model::CartItem;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Handle to the application's cart. Cheap to clone; all clones share one slot.
#[derive(Clone)]
pub struct CartStore {
    slot: PersistentSlot<CartItem>,
}

impl CartStore {
    /// Loads the cart from `storage`. Never fails; see the module docs.
    pub fn load(storage: Arc<dyn DurableStorage>) -> Self {
        let slot = PersistentSlot::load(storage);
        info!(occupied = !slot.is_empty(), "Cart loaded");
        Self { slot }
    }

    /// The item in the cart, if any.
    pub fn current_item(&self) -> Option<CartItem> {
        self.slot.get()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    /// Puts `item` in the cart, replacing whatever was there.
    ///
    /// A malformed item (see [`entity`]) is logged and ignored: it could not be
    /// restored on the next load, so it never enters the cart.
    #[instrument(skip(self, item), fields(device_id = %item.device_id, recycler_id = %item.recycler_id))]
    pub fn add_to_cart(&self, item: CartItem) {
        info!(price = item.price, "Adding to cart");
        if let Err(e) = self.slot.set(item) {
            warn!(error = %e, "Malformed item, cart unchanged");
        }
    }

    /// Puts `item` in the cart only if the cart is empty.
    #[instrument(skip(self, item), fields(device_id = %item.device_id, recycler_id = %item.recycler_id))]
    pub fn try_add_to_cart(&self, item: CartItem) -> Result<(), CartError> {
        self.slot.set_if_empty(item).map_err(|rejection| match rejection {
            SlotRejection::Occupied(current) => {
                info!(current_device = %current.device_id, "Cart occupied, add refused");
                CartError::Occupied(Box::new(current))
            }
            SlotRejection::Invalid(reason) => {
                warn!(%reason, "Malformed item, add refused");
                CartError::Invalid(reason)
            }
        })
    }

    /// Empties the cart (user removed the item).
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self) {
        info!("Removing from cart");
        self.slot.clear();
    }

    /// Empties the cart (order submitted). Same effect as [`remove_from_cart`](Self::remove_from_cart).
    #[instrument(skip(self))]
    pub fn clear_cart(&self) {
        info!("Clearing cart");
        self.slot.clear();
    }

    /// Empties the cart only if it still holds `item`. Returns `true` if it did.
    ///
    /// Used after an order for `item` is confirmed: a cart that changed while the
    /// order was in flight is left alone.
    #[instrument(skip_all, fields(device_id = %item.device_id, recycler_id = %item.recycler_id))]
    pub fn clear_cart_if_holding(&self, item: &CartItem) -> bool {
        let cleared = self.slot.clear_if(|current| current == item);
        if cleared {
            info!("Clearing cart");
        } else {
            info!("Cart no longer holds this item, kept");
        }
        cleared
    }

    /// Subscribes to cart changes.
    pub fn subscribe(&self) -> Subscription<CartItem> {
        self.slot.subscribe()
    }
}
