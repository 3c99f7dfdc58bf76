//! # Application Lifecycle
//!
//! Startup, wiring and shutdown of the trade-in client.
//!
//! ## Responsibilities
//!
//! 1. **Configuration** - [`AppConfig::from_env`] reads `TRADEIN_*` variables
//! 2. **Store creation** - the cart is loaded exactly once, from durable storage
//! 3. **Dependency injection** - the same [`CartStore`](crate::cart::CartStore) handle is
//!    given to the offer selector, checkout and badge; nothing reaches for a global
//! 4. **Graceful shutdown** - background watchers are signalled and awaited
//! 5. **Observability** - [`setup_tracing`] configures `tracing-subscriber`
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let cart = CartStore::load(storage);
//! let offer_selector = OfferSelector::new(cart.clone(), catalog);
//! let checkout = CheckoutFlow::new(cart.clone(), orders);
//! let badge = CartBadge::new(&cart);
//! ```
//!
//! Tests build the same graph with [`TradeInApp::with_parts`], swapping in
//! [`MemoryStorage`](crate::framework::MemoryStorage) and the
//! [`mock`](crate::clients::mock) clients.

pub mod app;
pub mod config;
pub mod tracing;

pub use self::app::*;
pub use self::config::*;
pub use self::tracing::*;
