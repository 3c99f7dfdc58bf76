//! # Order Client
//!
//! Submits single-item trade-in orders to the backend.

use crate::clients::rest::{ApiError, RestClient};
use crate::model::{OrderConfirmation, OrderRequest};
use async_trait::async_trait;
use tracing::{info, instrument};

/// The order collaborator.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Places the order. `Ok` means the backend confirmed it.
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ApiError>;
}

/// HTTP implementation of [`OrderApi`].
#[derive(Clone)]
pub struct OrderClient {
    inner: RestClient,
}

impl OrderClient {
    pub fn new(inner: RestClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl OrderApi for OrderClient {
    #[instrument(skip(self, request), fields(device_id = %request.item.device_id))]
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ApiError> {
        info!("Sending order to backend");
        let confirmation: OrderConfirmation = self.inner.post_json(&["orders"], request).await?;
        info!(order_id = %confirmation.order_id, status = %confirmation.status, "Order confirmed");
        Ok(confirmation)
    }
}
