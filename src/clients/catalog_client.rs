//! # Catalog Client
//!
//! Read-only access to the device catalog and its recycler offers.

use crate::clients::rest::{ApiError, RestClient};
use crate::model::{Device, Offer};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// The catalog collaborator: devices and the offers recyclers make for them.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one device by ID.
    async fn get_device(&self, device_id: &str) -> Result<Device, ApiError>;

    /// Fetches every recycler offer for a device in one storage variant and condition.
    async fn get_offers(
        &self,
        device_id: &str,
        storage: &str,
        condition: &str,
    ) -> Result<Vec<Offer>, ApiError>;
}

/// HTTP implementation of [`CatalogApi`].
#[derive(Clone)]
pub struct CatalogClient {
    inner: RestClient,
}

impl CatalogClient {
    pub fn new(inner: RestClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn get_device(&self, device_id: &str) -> Result<Device, ApiError> {
        debug!("Sending request");
        self.inner.get_json(&["devices", device_id], &[]).await
    }

    #[instrument(skip(self))]
    async fn get_offers(
        &self,
        device_id: &str,
        storage: &str,
        condition: &str,
    ) -> Result<Vec<Offer>, ApiError> {
        debug!("Sending request");
        let offers: Vec<Offer> = self
            .inner
            .get_json(
                &["devices", device_id, "offers"],
                &[("storage", storage), ("condition", condition)],
            )
            .await?;
        debug!(count = offers.len(), "Offers received");
        Ok(offers)
    }
}
