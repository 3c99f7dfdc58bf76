use std::sync::Arc;
use tempfile::TempDir;
use tradein_cart::cart::{CartStore, CART_STORAGE_KEY};
use tradein_cart::framework::mock::{MockStorage, StorageOp};
use tradein_cart::framework::{DurableStorage, FileStorage, MemoryStorage, StorageError};
use tradein_cart::model::CartItem;

fn item(device_id: &str, device_name: &str, price: f64) -> CartItem {
    CartItem {
        device_id: device_id.to_string(),
        device_name: device_name.to_string(),
        device_image: String::new(),
        recycler_id: "r1".to_string(),
        recycler_name: "GreenTech".to_string(),
        recycler_logo: String::new(),
        recycler_city: String::new(),
        price,
        storage: "64GB".to_string(),
        condition: "Good".to_string(),
    }
}

#[test]
fn add_then_get_returns_the_same_item() {
    let cart = CartStore::load(Arc::new(MemoryStorage::new()));
    let x = item("d1", "iPhone 12", 120.0);

    cart.add_to_cart(x.clone());

    assert_eq!(cart.current_item(), Some(x));
    assert!(!cart.is_empty());
}

#[test]
fn remove_and_clear_empty_the_cart_across_restarts() {
    let storage = Arc::new(MemoryStorage::new());

    let cart = CartStore::load(storage.clone());
    cart.add_to_cart(item("d1", "iPhone 12", 120.0));
    cart.remove_from_cart();
    assert_eq!(cart.current_item(), None);
    assert!(!storage.contains(CART_STORAGE_KEY));
    drop(cart);
    assert_eq!(CartStore::load(storage.clone()).current_item(), None);

    let cart = CartStore::load(storage.clone());
    cart.add_to_cart(item("d2", "Pixel 7", 95.0));
    cart.clear_cart();
    assert_eq!(cart.current_item(), None);
    assert!(!storage.contains(CART_STORAGE_KEY));
    drop(cart);
    assert_eq!(CartStore::load(storage).current_item(), None);
}

#[test]
fn removing_twice_is_the_same_as_removing_once() {
    let storage = Arc::new(MockStorage::new());
    let cart = CartStore::load(storage.clone());
    cart.add_to_cart(item("d1", "iPhone 12", 120.0));

    cart.remove_from_cart();
    let after_once = (cart.current_item(), storage.raw(CART_STORAGE_KEY));
    cart.remove_from_cart();
    let after_twice = (cart.current_item(), storage.raw(CART_STORAGE_KEY));

    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice, (None, None));
}

#[test]
fn item_survives_a_restart() {
    let storage = Arc::new(MemoryStorage::new());
    let x = item("d1", "iPhone 12", 120.0);

    let cart = CartStore::load(storage.clone());
    cart.add_to_cart(x.clone());
    drop(cart);

    let reloaded = CartStore::load(storage);
    assert_eq!(reloaded.current_item(), Some(x));
}

#[test]
fn item_survives_a_restart_on_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let x = item("d1", "iPhone 12", 120.0);

    let cart = CartStore::load(Arc::new(FileStorage::new(dir.path())));
    cart.add_to_cart(x.clone());
    drop(cart);

    assert!(dir.path().join("cart.json").exists());
    let reloaded = CartStore::load(Arc::new(FileStorage::new(dir.path())));
    assert_eq!(reloaded.current_item(), Some(x));

    reloaded.clear_cart();
    assert!(!dir.path().join("cart.json").exists());
}

#[test]
fn corrupt_entry_loads_as_empty_cart() {
    for corrupt in ["{not json", "null", "42", r#"{"deviceId":"d1"}"#, ""] {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(CART_STORAGE_KEY, corrupt);

        let cart = CartStore::load(storage.clone());

        assert_eq!(cart.current_item(), None, "value {corrupt:?} should load empty");
        assert!(!storage.contains(CART_STORAGE_KEY));
    }
}

#[test]
fn unreadable_storage_loads_as_empty_cart() {
    let storage = Arc::new(MockStorage::new());
    storage
        .expect_get()
        .return_err(StorageError::Unavailable("storage disabled".into()));

    let cart = CartStore::load(storage.clone());

    assert_eq!(cart.current_item(), None);
    storage.verify();
}

#[test]
fn second_add_overwrites_without_merging() {
    let cart = CartStore::load(Arc::new(MemoryStorage::new()));
    let x = item("d1", "iPhone 12", 120.0);
    let mut y = item("d2", "Galaxy S21", 80.0);
    y.recycler_id = "r2".to_string();
    y.recycler_name = "EcoCash".to_string();
    y.recycler_city = "Leeds".to_string();

    cart.add_to_cart(x);
    cart.add_to_cart(y.clone());

    assert_eq!(cart.current_item(), Some(y));
}

#[test]
fn add_then_clear_then_reload_scenario() {
    let storage = Arc::new(MemoryStorage::new());
    let cart = CartStore::load(storage.clone());

    cart.add_to_cart(item("d1", "iPhone 12", 120.0));
    assert_eq!(cart.current_item().map(|i| i.price), Some(120.0));

    cart.clear_cart();
    assert_eq!(cart.current_item(), None);

    drop(cart);
    assert_eq!(CartStore::load(storage).current_item(), None);
}

#[test]
fn failed_write_keeps_the_in_memory_item() {
    let storage = Arc::new(MockStorage::new());
    storage.expect_set().return_err(StorageError::QuotaExceeded {
        key: CART_STORAGE_KEY.to_string(),
        needed: 512,
        available: 0,
    });
    let cart = CartStore::load(storage.clone());
    let x = item("d1", "iPhone 12", 120.0);

    cart.add_to_cart(x.clone());

    assert_eq!(cart.current_item(), Some(x));
    assert_eq!(storage.raw(CART_STORAGE_KEY), None);
    storage.verify();
}

#[test]
fn failed_delete_still_empties_the_cart() {
    let storage = Arc::new(MockStorage::new());
    storage
        .expect_remove()
        .return_err(StorageError::Unavailable("read-only".into()));
    let cart = CartStore::load(storage.clone());
    cart.add_to_cart(item("d1", "iPhone 12", 120.0));

    cart.clear_cart();

    assert_eq!(cart.current_item(), None);
    // The stale entry remains on disk; the next session would restore it.
    assert!(storage.raw(CART_STORAGE_KEY).is_some());
}

#[test]
fn every_mutation_writes_through_in_call_order() {
    let storage = Arc::new(MockStorage::new());
    let cart = CartStore::load(storage.clone());
    let x = item("d1", "iPhone 12", 120.0);
    let y = item("d2", "Pixel 7", 95.0);

    cart.add_to_cart(x.clone());
    cart.add_to_cart(y.clone());
    cart.remove_from_cart();

    let key = CART_STORAGE_KEY.to_string();
    assert_eq!(
        storage.ops(),
        vec![
            StorageOp::Get(key.clone()),
            StorageOp::Set(key.clone(), serde_json::to_string(&x).unwrap()),
            StorageOp::Set(key.clone(), serde_json::to_string(&y).unwrap()),
            StorageOp::Remove(key),
        ]
    );
}

#[test]
fn stored_value_uses_the_documented_field_names() {
    let storage = Arc::new(MemoryStorage::new());
    let cart = CartStore::load(storage.clone());

    cart.add_to_cart(item("d1", "iPhone 12", 120.0));

    let raw = storage
        .get(CART_STORAGE_KEY)
        .expect("Failed to read storage")
        .expect("Cart entry missing");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("Stored value is not JSON");
    for field in [
        "deviceId",
        "deviceName",
        "recyclerId",
        "recyclerName",
        "recyclerLogo",
        "recyclerCity",
        "price",
        "storage",
        "condition",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}

#[tokio::test]
async fn subscribers_observe_each_mutation() {
    let cart = CartStore::load(Arc::new(MemoryStorage::new()));
    let mut first = cart.subscribe();
    let mut second = cart.clone().subscribe();
    let x = item("d1", "iPhone 12", 120.0);

    cart.add_to_cart(x.clone());
    assert_eq!(first.changed().await, Ok(Some(x.clone())));
    assert_eq!(second.changed().await, Ok(Some(x)));

    cart.clear_cart();
    assert_eq!(first.changed().await, Ok(None));
    assert_eq!(second.current(), None);
}

#[tokio::test]
async fn subscriber_in_another_task_wakes_on_add() {
    let cart = CartStore::load(Arc::new(MemoryStorage::new()));
    let mut subscription = cart.subscribe();

    let watcher = tokio::spawn(async move { subscription.changed().await });
    tokio::task::yield_now().await;
    cart.add_to_cart(item("d1", "iPhone 12", 120.0));

    let seen = watcher
        .await
        .expect("Watcher panicked")
        .expect("Store closed");
    assert_eq!(seen.map(|i| i.device_id), Some("d1".to_string()));
}
