//! # Trade-in Cart
//!
//! > **The client-side core of a device trade-in marketplace.**
//!
//! Users pick a device, compare cash offers from recycling partners and place a
//! single-item order. Almost everything is a thin view over a REST backend; the one
//! piece with real behaviour is the **persistent single-item cart**.
//!
//! ## 🏗️ Design
//!
//! ### One slot, one owner
//! The cart holds zero or one [`CartItem`](model::CartItem). It is an explicitly
//! constructed [`CartStore`](cart::CartStore), created once at start and cloned into
//! each consumer. There is no module-level global.
//!
//! ### Write-through persistence
//! Every mutation writes synchronously to [`DurableStorage`](framework::DurableStorage).
//! Emptying the cart deletes the key, so "no cart" has exactly one representation.
//! Storage failures are logged, never returned: the in-memory cart is the truth for
//! the current run, storage is best effort for the next one.
//!
//! ### Reactive consumers
//! Consumers hold a [`Subscription`](framework::Subscription) backed by a
//! `tokio::sync::watch` channel and see every change without polling.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic [`PersistentSlot<T>`](framework::PersistentSlot) plus storage backends.
//!
//! ### 2. The Cart ([`cart`])
//! [`CartStore`](cart::CartStore): `current_item`, `add_to_cart`, `try_add_to_cart`,
//! `remove_from_cart`, `clear_cart`, `subscribe`.
//!
//! ### 3. The Backend ([`clients`])
//! [`CatalogApi`](clients::CatalogApi) and [`OrderApi`](clients::OrderApi) with HTTP
//! implementations and mocks.
//!
//! ### 4. The Consumers ([`flows`])
//! [`OfferSelector`](flows::OfferSelector), [`CheckoutFlow`](flows::CheckoutFlow),
//! [`CartBadge`](flows::CartBadge).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`TradeInApp`](lifecycle::TradeInApp), configuration and tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- show
//! RUST_LOG=info cargo run -- offers d1 64GB Good
//! ```

pub mod cart;
pub mod clients;
pub mod flows;
pub mod framework;
pub mod lifecycle;
pub mod model;
