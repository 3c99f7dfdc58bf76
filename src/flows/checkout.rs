//! # Checkout Flow
//!
//! Turns the single cart item plus customer details into an order.
//!
//! The cart is cleared only after the backend confirms the order, and only if it
//! still holds the item that was ordered. A failed submission leaves the cart
//! exactly as it was so the user can retry.

use crate::cart::CartStore;
use crate::clients::{ApiError, OrderApi};
use crate::model::{CartItem, CustomerDetails, OrderConfirmation, OrderRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid customer details: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Order submission failed: {0}")]
    Submission(#[from] ApiError),
}

#[derive(Clone)]
pub struct CheckoutFlow {
    cart: CartStore,
    orders: Arc<dyn OrderApi>,
}

impl CheckoutFlow {
    pub fn new(cart: CartStore, orders: Arc<dyn OrderApi>) -> Self {
        Self { cart, orders }
    }

    /// The item being checked out. Checkout is unreachable with an empty cart.
    pub fn guard(&self) -> Result<CartItem, CheckoutError> {
        self.cart.current_item().ok_or(CheckoutError::EmptyCart)
    }

    /// Validates, submits, and on confirmation clears the cart.
    #[instrument(skip_all)]
    pub async fn submit(&self, customer: CustomerDetails) -> Result<OrderConfirmation, CheckoutError> {
        let item = self.guard()?;
        customer.validate().map_err(CheckoutError::Validation)?;

        let request = OrderRequest { item, customer };
        let confirmation = match self.orders.submit_order(&request).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!(error = %e, "Order submission failed, cart kept");
                return Err(e.into());
            }
        };

        if !self.cart.clear_cart_if_holding(&request.item) {
            warn!(order_id = %confirmation.order_id, "Cart changed during checkout, new item kept");
        }
        info!(order_id = %confirmation.order_id, "Checkout complete");
        Ok(confirmation)
    }
}
