//! SlotEntity trait implementation for [`CartItem`].
//!
//! Enables [`CartItem`] to be held by the generic
//! [`PersistentSlot`](crate::framework::PersistentSlot). Stored entries that parse but
//! fail [`validate`](SlotEntity::validate) are discarded on load like corrupt ones.

use crate::framework::SlotEntity;
use crate::model::CartItem;

/// The fixed durable storage key for the cart.
pub const CART_STORAGE_KEY: &str = "cart";

impl SlotEntity for CartItem {
    const STORAGE_KEY: &'static str = CART_STORAGE_KEY;

    /// Rejects entries that could not have come from a real offer.
    ///
    /// # Checks
    /// - `deviceId` and `recyclerId` are non-empty
    /// - `price` is finite and not negative
    fn validate(&self) -> Result<(), String> {
        if self.device_id.trim().is_empty() {
            return Err("missing deviceId".to_string());
        }
        if self.recycler_id.trim().is_empty() {
            return Err("missing recyclerId".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("invalid price: {}", self.price));
        }
        Ok(())
    }
}
