use serde::{Deserialize, Serialize};

/// A tradeable device as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub brand: String,
}

/// A partner that buys traded-in devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recycler {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub city: String,
}

/// One recycler's cash quote for a device in a given storage variant and condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub recycler: Recycler,
    /// Quoted value in pounds.
    pub price: f64,
    pub storage: String,
    pub condition: String,
}

/// Sorts offers best first: highest price, then recycler name for a stable order.
pub fn rank_offers(offers: &mut [Offer]) {
    offers.sort_by(|a, b| {
        b.price
            .total_cmp(&a.price)
            .then_with(|| a.recycler.name.cmp(&b.recycler.name))
    });
}
