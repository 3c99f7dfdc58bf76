//! # Header Badge
//!
//! Derives the header's cart counter from cart presence. There is no stored count:
//! the badge reads 1 exactly when the cart holds an item.

use crate::cart::CartStore;
use crate::framework::{FrameworkError, Subscription};
use crate::model::CartItem;

/// Reactive view of the cart for the header.
#[derive(Clone)]
pub struct CartBadge {
    subscription: Subscription<CartItem>,
}

impl CartBadge {
    pub fn new(cart: &CartStore) -> Self {
        Self {
            subscription: cart.subscribe(),
        }
    }

    /// 0 or 1.
    pub fn count(&self) -> usize {
        usize::from(self.subscription.current().is_some())
    }

    /// Whether the checkout link should be enabled.
    pub fn checkout_allowed(&self) -> bool {
        self.count() > 0
    }

    /// Waits for the cart to change and returns the new count.
    pub async fn changed(&mut self) -> Result<usize, FrameworkError> {
        let item = self.subscription.changed().await?;
        Ok(usize::from(item.is_some()))
    }
}
