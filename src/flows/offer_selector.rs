//! # Device Offer Selector
//!
//! Compares recycler offers for a device and puts the chosen one in the cart.
//!
//! Selection refuses while the cart already holds an item and hands the existing
//! item back, so the caller can tell the user what is already selected.

use crate::cart::{CartError, CartStore};
use crate::clients::{ApiError, CatalogApi};
use crate::model::{rank_offers, CartItem, Device, Offer};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Errors that can occur while selecting an offer.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// One device per order: the cart must be emptied or checked out first.
    #[error("Already selected: {} from {}", .0.device_name, .0.recycler_name)]
    AlreadySelected(Box<CartItem>),

    #[error("No offer from recycler {recycler_id} for device {device_id}")]
    OfferNotFound {
        device_id: String,
        recycler_id: String,
    },

    /// The catalog returned an offer the cart cannot hold (e.g. a negative price).
    #[error("Unusable offer: {0}")]
    InvalidOffer(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] ApiError),
}

impl From<CartError> for SelectionError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::Occupied(current) => SelectionError::AlreadySelected(current),
            CartError::Invalid(reason) => SelectionError::InvalidOffer(reason),
        }
    }
}

/// Reads devices and offers from the catalog and feeds the cart.
#[derive(Clone)]
pub struct OfferSelector {
    cart: CartStore,
    catalog: Arc<dyn CatalogApi>,
}

impl OfferSelector {
    pub fn new(cart: CartStore, catalog: Arc<dyn CatalogApi>) -> Self {
        Self { cart, catalog }
    }

    /// All offers for a device variant, best first.
    #[instrument(skip(self))]
    pub async fn compare_offers(
        &self,
        device_id: &str,
        storage: &str,
        condition: &str,
    ) -> Result<Vec<Offer>, SelectionError> {
        let mut offers = self.catalog.get_offers(device_id, storage, condition).await?;
        rank_offers(&mut offers);
        debug!(count = offers.len(), "Offers ranked");
        Ok(offers)
    }

    /// Snapshots `offer` for `device` into the cart. The caller proceeds to checkout.
    #[instrument(skip_all, fields(device_id = %device.id, recycler_id = %offer.recycler.id))]
    pub fn select(&self, device: &Device, offer: &Offer) -> Result<CartItem, SelectionError> {
        let item = CartItem::from_offer(device, offer);
        self.cart.try_add_to_cart(item.clone())?;
        info!(price = item.price, "Offer selected");
        Ok(item)
    }

    /// Fetches the device and its offers, then selects the given recycler's offer.
    #[instrument(skip(self))]
    pub async fn select_by_recycler(
        &self,
        device_id: &str,
        recycler_id: &str,
        storage: &str,
        condition: &str,
    ) -> Result<CartItem, SelectionError> {
        if let Some(current) = self.cart.current_item() {
            return Err(SelectionError::AlreadySelected(Box::new(current)));
        }

        let device = self.catalog.get_device(device_id).await?;
        let offers = self.catalog.get_offers(device_id, storage, condition).await?;
        let Some(offer) = offers.iter().find(|o| o.recycler.id == recycler_id) else {
            warn!(available = offers.len(), "Recycler has no offer");
            return Err(SelectionError::OfferNotFound {
                device_id: device_id.to_string(),
                recycler_id: recycler_id.to_string(),
            });
        };

        self.select(&device, offer)
    }
}
