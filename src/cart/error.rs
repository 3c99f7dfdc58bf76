//! Error types for the cart.

use crate::model::CartItem;
use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// Storage problems never appear here; the cart absorbs and logs them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart already holds an item; one device per order.
    #[error("Cart already holds {} from {}", .0.device_name, .0.recycler_name)]
    Occupied(Box<CartItem>),

    /// The item is malformed and would not survive a reload.
    #[error("Invalid cart item: {0}")]
    Invalid(String),
}
