//! Thin consumers of the cart: the offer selector, checkout and the header badge.

pub mod badge;
pub mod checkout;
pub mod offer_selector;

pub use badge::*;
pub use checkout::*;
pub use offer_selector::*;
