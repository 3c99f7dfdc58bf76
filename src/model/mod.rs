//! Pure data structures shared by the cart, the REST clients and the flows.

pub mod cart_item;
pub mod device;
pub mod order;

pub use cart_item::*;
pub use device::*;
pub use order::*;
