//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole application.
//!
//! ## Configuration
//!
//! Log lines use the compact format without module prefixes (`with_target(false)`);
//! the structured fields (`key`, `device_id`, `recycler_id`, `order_id`) carry the context.
//!
//! ```bash
//! RUST_LOG=info tradein-cart show      # cart lifecycle and order outcomes
//! RUST_LOG=debug tradein-cart show     # plus every storage write and HTTP request
//! RUST_LOG=tradein_cart::framework=debug tradein-cart clear
//! ```
//!
//! ## What Gets Traced
//!
//! - **Cart lifecycle**: load (occupied or not), add, remove, clear, refused adds
//! - **Persistence**: each write-through at `debug`, failures at `warn`
//! - **Corrupt storage**: discarded entries at `warn` with the parse error
//! - **Backend calls**: one span per client method, failures with status codes
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Cart loaded occupied=false
//! INFO select_by_recycler:select: Offer selected device_id="d1" recycler_id="r1" price=120.0
//! INFO submit:submit_order: Sending order to backend device_id="d1"
//! INFO submit:submit_order: Order confirmed order_id=ord_1 status=pending
//! INFO submit:clear_cart_if_holding: Clearing cart
//! INFO submit: Checkout complete order_id=ord_1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
