use crate::model::CartItem;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How the recycler pays the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PayoutMethod {
    #[default]
    BankTransfer,
    PayPal,
    Cheque,
}

/// Contact and payout details collected at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: String,
    pub postcode: String,
    #[serde(default)]
    pub payout_method: PayoutMethod,
}

impl CustomerDetails {
    /// Checks the form fields, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.full_name.trim().is_empty() {
            problems.push("full name is required".to_string());
        }
        if !is_plausible_email(self.email.trim()) {
            problems.push(format!("invalid email address: '{}'", self.email));
        }
        if self.address.trim().is_empty() {
            problems.push("address is required".to_string());
        }
        if self.postcode.trim().is_empty() {
            problems.push("postcode is required".to_string());
        }
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        if !self.phone.trim().is_empty() && digits < 7 {
            problems.push(format!("invalid phone number: '{}'", self.phone));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Payload for the order submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub item: CartItem,
    pub customer: CustomerDetails,
}

/// Type-safe identifier for orders issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The backend's acknowledgement of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pending".to_string()
}
