use crate::cart::CartStore;
use crate::clients::{ApiError, CatalogApi, CatalogClient, OrderApi, OrderClient, RestClient};
use crate::flows::{CartBadge, CheckoutFlow, OfferSelector};
use crate::framework::{DurableStorage, FileStorage};
use crate::lifecycle::config::{AppConfig, ConfigError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors raised while starting or stopping the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API client setup failed: {0}")]
    Api(#[from] ApiError),

    #[error("Background task failed: {0}")]
    Task(String),
}

/// The application root: owns the cart and wires it to every consumer.
///
/// `TradeInApp` is responsible for:
/// - **Lifecycle Management**: loading the cart once at start, stopping the badge watcher
/// - **Dependency Wiring**: one [`CartStore`] handed to the selector, checkout and badge
///
/// # Example
///
/// ```ignore
/// let app = TradeInApp::new(AppConfig::from_env()?)?;
///
/// let item = app.offer_selector.select_by_recycler("d1", "r1", "64GB", "Good").await?;
/// let confirmation = app.checkout.submit(customer).await?;
///
/// app.shutdown().await?;
/// ```
pub struct TradeInApp {
    /// The single cart store.
    pub cart: CartStore,

    pub offer_selector: OfferSelector,

    pub checkout: CheckoutFlow,

    /// The header counter.
    pub badge: CartBadge,

    shutdown_tx: Option<oneshot::Sender<()>>,
    handles: Vec<JoinHandle<()>>,
}

impl TradeInApp {
    /// Builds the app against the configured file storage and HTTP backend.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        let rest = RestClient::new(&config.api_base_url, config.http_timeout)?;
        let catalog = Arc::new(CatalogClient::new(rest.clone()));
        let orders = Arc::new(OrderClient::new(rest));
        Ok(Self::with_parts(storage, catalog, orders))
    }

    /// Builds the app from explicit collaborators.
    ///
    /// Must be called inside a Tokio runtime: it spawns the badge watcher.
    pub fn with_parts(
        storage: Arc<dyn DurableStorage>,
        catalog: Arc<dyn CatalogApi>,
        orders: Arc<dyn OrderApi>,
    ) -> Self {
        let cart = CartStore::load(storage);
        let offer_selector = OfferSelector::new(cart.clone(), catalog);
        let checkout = CheckoutFlow::new(cart.clone(), orders);
        let badge = CartBadge::new(&cart);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let watcher = tokio::spawn(watch_badge(CartBadge::new(&cart), shutdown_rx));

        Self {
            cart,
            offer_selector,
            checkout,
            badge,
            shutdown_tx: Some(shutdown_tx),
            handles: vec![watcher],
        }
    }

    /// Stops background tasks and waits for them to finish.
    ///
    /// The cart needs no flushing: every mutation was already written through.
    pub async fn shutdown(mut self) -> Result<(), AppError> {
        info!("Shutting down...");

        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!("Background task failed: {:?}", e);
                return Err(AppError::Task(e.to_string()));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}

/// Logs every change of the header count until told to stop.
async fn watch_badge(mut badge: CartBadge, mut shutdown: oneshot::Receiver<()>) {
    info!(count = badge.count(), "Badge watcher started");
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = badge.changed() => match changed {
                Ok(count) => info!(count, "Cart badge updated"),
                Err(_) => break,
            },
        }
    }
    info!("Badge watcher stopped");
}
