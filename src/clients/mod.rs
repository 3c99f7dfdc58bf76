//! Clients for the opaque REST backend (catalog and orders).
//!
//! Flows depend on the [`CatalogApi`] and [`OrderApi`] traits, never on HTTP directly,
//! so they can be tested against the [`mock`] implementations.

pub mod catalog_client;
pub mod mock;
pub mod order_client;
pub mod rest;

pub use catalog_client::*;
pub use order_client::*;
pub use rest::*;
