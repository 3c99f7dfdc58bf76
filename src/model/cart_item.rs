use crate::model::{Device, Offer};
use serde::{Deserialize, Serialize};

/// The single trade-in item a user has selected.
///
/// # Snapshot Semantics
/// Every field is copied from the catalog and the chosen offer at the moment the
/// item is added. Nothing here is ever refreshed afterwards: the quoted `price`
/// is the price the user saw.
///
/// # Persistence
/// This struct implements [`SlotEntity`](crate::framework::SlotEntity) (see
/// [`crate::cart::entity`]) and is stored as camelCase JSON under the `"cart"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub device_id: String,
    pub device_name: String,
    #[serde(default)]
    pub device_image: String,
    pub recycler_id: String,
    pub recycler_name: String,
    #[serde(default)]
    pub recycler_logo: String,
    #[serde(default)]
    pub recycler_city: String,
    /// Quoted value in pounds.
    pub price: f64,
    pub storage: String,
    pub condition: String,
}

impl CartItem {
    /// Snapshots a device and one of its offers into a cart item.
    pub fn from_offer(device: &Device, offer: &Offer) -> Self {
        Self {
            device_id: device.id.clone(),
            device_name: device.name.clone(),
            device_image: device.image.clone(),
            recycler_id: offer.recycler.id.clone(),
            recycler_name: offer.recycler.name.clone(),
            recycler_logo: offer.recycler.logo.clone(),
            recycler_city: offer.recycler.city.clone(),
            price: offer.price,
            storage: offer.storage.clone(),
            condition: offer.condition.clone(),
        }
    }
}
