//! # Mock Backend Clients
//!
//! In-memory stand-ins for [`CatalogApi`] and [`OrderApi`] with fluent expectations.
//!
//! | Feature | Mock | HTTP client |
//! |---------|------|-------------|
//! | **Speed** | Instant | Network round trip |
//! | **Determinism** | Scripted responses | Depends on backend |
//! | **Use Case** | Testing flows *around* the API | Testing the wire format |
//!
//! # Example
//! ```ignore
//! let orders = Arc::new(MockOrderApi::new());
//! orders.expect_submit().return_ok(confirmation);
//!
//! let checkout = CheckoutFlow::new(cart, orders.clone());
//! checkout.submit(customer).await?;
//!
//! orders.verify(); // Ensures all expectations were met
//! ```

use crate::clients::catalog_client::CatalogApi;
use crate::clients::order_client::OrderApi;
use crate::clients::rest::ApiError;
use crate::model::{Device, Offer, OrderConfirmation, OrderRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// CATALOG
// =============================================================================

enum CatalogExpectation {
    Device {
        device_id: String,
        response: Result<Device, ApiError>,
    },
    Offers {
        device_id: String,
        response: Result<Vec<Offer>, ApiError>,
    },
}

/// A mock catalog. Calls must arrive in the order expectations were set.
#[derive(Default)]
pub struct MockCatalogApi {
    expectations: Arc<Mutex<VecDeque<CatalogExpectation>>>,
}

impl MockCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `get_device` call for `device_id`.
    pub fn expect_get_device(&self, device_id: &str) -> DeviceExpectationBuilder {
        DeviceExpectationBuilder {
            device_id: device_id.to_string(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get_offers` call for `device_id`.
    pub fn expect_get_offers(&self, device_id: &str) -> OffersExpectationBuilder {
        OffersExpectationBuilder {
            device_id: device_id.to_string(),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all catalog expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self) -> Option<CatalogExpectation> {
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn get_device(&self, device_id: &str) -> Result<Device, ApiError> {
        match self.next() {
            Some(CatalogExpectation::Device {
                device_id: expected,
                response,
            }) => {
                assert_eq!(device_id, expected, "get_device called with unexpected id");
                response
            }
            _ => panic!("Unexpected get_device({device_id}) or expectation mismatch"),
        }
    }

    async fn get_offers(
        &self,
        device_id: &str,
        _storage: &str,
        _condition: &str,
    ) -> Result<Vec<Offer>, ApiError> {
        match self.next() {
            Some(CatalogExpectation::Offers {
                device_id: expected,
                response,
            }) => {
                assert_eq!(device_id, expected, "get_offers called with unexpected id");
                response
            }
            _ => panic!("Unexpected get_offers({device_id}) or expectation mismatch"),
        }
    }
}

/// Builder for `get_device` expectations.
pub struct DeviceExpectationBuilder {
    device_id: String,
    expectations: Arc<Mutex<VecDeque<CatalogExpectation>>>,
}

impl DeviceExpectationBuilder {
    pub fn return_ok(self, device: Device) {
        self.push(Ok(device));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Device, ApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(CatalogExpectation::Device {
            device_id: self.device_id,
            response,
        });
    }
}

/// Builder for `get_offers` expectations.
pub struct OffersExpectationBuilder {
    device_id: String,
    expectations: Arc<Mutex<VecDeque<CatalogExpectation>>>,
}

impl OffersExpectationBuilder {
    pub fn return_ok(self, offers: Vec<Offer>) {
        self.push(Ok(offers));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<Offer>, ApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(CatalogExpectation::Offers {
            device_id: self.device_id,
            response,
        });
    }
}

// =============================================================================
// ORDERS
// =============================================================================

/// A mock order backend that records every submitted request.
#[derive(Default)]
pub struct MockOrderApi {
    expectations: Arc<Mutex<VecDeque<Result<OrderConfirmation, ApiError>>>>,
    received: Mutex<Vec<OrderRequest>>,
}

impl MockOrderApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `submit_order` call.
    pub fn expect_submit(&self) -> SubmitExpectationBuilder {
        SubmitExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Every request submitted so far.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all order expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl OrderApi for MockOrderApi {
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ApiError> {
        self.received.lock().unwrap().push(request.clone());
        let response = self.expectations.lock().unwrap().pop_front();
        match response {
            Some(response) => response,
            None => panic!("Unexpected submit_order call"),
        }
    }
}

/// Builder for `submit_order` expectations.
pub struct SubmitExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Result<OrderConfirmation, ApiError>>>>,
}

impl SubmitExpectationBuilder {
    pub fn return_ok(self, confirmation: OrderConfirmation) {
        self.expectations.lock().unwrap().push_back(Ok(confirmation));
    }

    pub fn return_err(self, error: ApiError) {
        self.expectations.lock().unwrap().push_back(Err(error));
    }
}
