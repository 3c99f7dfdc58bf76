//! # Trade-in Cart CLI
//!
//! A small command-line front end over [`TradeInApp`]. The cart survives between
//! invocations because every mutation is written through to `TRADEIN_STORAGE_DIR`.
//!
//! ```text
//! tradein-cart show
//! tradein-cart clear
//! tradein-cart offers <device_id> <storage> <condition>
//! tradein-cart select <device_id> <recycler_id> <storage> <condition>
//! tradein-cart checkout <full_name> <email> <address> <postcode> [phone]
//! ```

use tracing::{error, info, Instrument};
use tradein_cart::lifecycle::{setup_tracing, AppConfig, TradeInApp};
use tradein_cart::model::{CustomerDetails, PayoutMethod};

const USAGE: &str = "usage: tradein-cart <show|clear|offers|select|checkout> [args...]";

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    let app = TradeInApp::new(config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("cli", command = args.first().map(String::as_str).unwrap_or("show"));
    let result = run(&app, &args).instrument(span).await;

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }

    app.shutdown().await.map_err(|e| e.to_string())?;
    result
}

async fn run(app: &TradeInApp, args: &[String]) -> Result<(), String> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["show"] => {
            match app.cart.current_item() {
                Some(item) => println!(
                    "{} ({}, {}) -> {} ({}): £{:.2}",
                    item.device_name,
                    item.storage,
                    item.condition,
                    item.recycler_name,
                    item.recycler_city,
                    item.price
                ),
                None => println!("Cart is empty"),
            }
            println!("Items: {}", app.badge.count());
        }
        ["clear"] => {
            app.cart.remove_from_cart();
            println!("Cart cleared");
        }
        ["offers", device_id, storage, condition] => {
            let offers = app
                .offer_selector
                .compare_offers(device_id, storage, condition)
                .await
                .map_err(|e| e.to_string())?;
            if offers.is_empty() {
                println!("No offers for {device_id} ({storage}, {condition})");
            }
            for offer in offers {
                println!("{:<12} {:<24} £{:.2}", offer.recycler.id, offer.recycler.name, offer.price);
            }
        }
        ["select", device_id, recycler_id, storage, condition] => {
            let item = app
                .offer_selector
                .select_by_recycler(device_id, recycler_id, storage, condition)
                .await
                .map_err(|e| e.to_string())?;
            println!("Selected {} from {} for £{:.2}", item.device_name, item.recycler_name, item.price);
        }
        ["checkout", full_name, email, address, postcode, rest @ ..] if rest.len() <= 1 => {
            let customer = CustomerDetails {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: rest.first().map(|p| p.to_string()).unwrap_or_default(),
                address: address.to_string(),
                postcode: postcode.to_string(),
                payout_method: PayoutMethod::default(),
            };
            let confirmation = app.checkout.submit(customer).await.map_err(|e| e.to_string())?;
            info!(order_id = %confirmation.order_id, "Order placed");
            println!("Order {} ({})", confirmation.order_id, confirmation.status);
        }
        _ => return Err(USAGE.to_string()),
    }

    Ok(())
}
