mod common;

use common::Fixture;
use shared::error::ErrorCode;
use shared::inventory::{InventoryItemCreate, InventoryItemUpdate, StockAlertKind};
use shared::{StockStatus, derive_status};

fn buns(id: &str, on_hand: f64, par_level: f64) -> InventoryItemCreate {
    InventoryItemCreate {
        id: Some(id.to_string()),
        name: format!("Buns {id}"),
        sku: format!("SKU-{id}"),
        on_hand,
        par_level,
        unit: "pcs".to_string(),
        unit_cost: 0.3,
    }
}

fn assert_consistent(fx: &Fixture) {
    for item in fx.state.stores().inventory_snapshot() {
        assert_eq!(item.status(), derive_status(item.on_hand(), item.par_level()));
    }
}

#[test]
fn test_at_par_is_low_until_received_above() {
    let fx = Fixture::new();
    let inventory = fx.state.inventory();
    let manager = fx.bearer("manager");

    let item = inventory.create(Some(&manager), buns("b1", 20.0, 20.0)).unwrap();
    assert_eq!(item.status(), StockStatus::LowStock);

    let write = inventory.receive_stock(Some(&manager), "b1", 1.0).unwrap();
    assert_eq!(write.item.on_hand(), 21.0);
    assert_eq!(write.item.status(), StockStatus::InStock);
    assert!(write.alerts.is_empty());
    assert_consistent(&fx);
}

#[test]
fn test_writes_raise_threshold_alerts() {
    let fx = Fixture::new();
    let inventory = fx.state.inventory();
    let manager = fx.bearer("manager");
    inventory.create(Some(&manager), buns("b1", 30.0, 20.0)).unwrap();

    let write = inventory
        .update(
            Some(&manager),
            "b1",
            InventoryItemUpdate {
                on_hand: Some(15.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(write.item.status(), StockStatus::LowStock);
    assert_eq!(write.item.par_level(), 20.0);
    let kinds: Vec<_> = write.alerts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![StockAlertKind::LowStock]);

    let write = inventory.receive_stock(Some(&manager), "b1", -15.0).unwrap();
    assert_eq!(write.item.status(), StockStatus::OutOfStock);
    let kinds: Vec<_> = write.alerts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![StockAlertKind::OutOfStock]);
    assert_consistent(&fx);
}

#[test]
fn test_update_keeps_missing_levels() {
    let fx = Fixture::new();
    let inventory = fx.state.inventory();
    let manager = fx.bearer("manager");
    inventory.create(Some(&manager), buns("b1", 50.0, 10.0)).unwrap();

    let write = inventory
        .update(
            Some(&manager),
            "b1",
            InventoryItemUpdate {
                par_level: Some(60.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(write.item.on_hand(), 50.0);
    assert_eq!(write.item.status(), StockStatus::LowStock);
    assert_consistent(&fx);
}

#[test]
fn test_bulk_create_skips_existing_ids() {
    let fx = Fixture::new();
    let inventory = fx.state.inventory();
    let manager = fx.bearer("manager");

    assert_eq!(inventory.bulk_create(Some(&manager), Vec::new()).unwrap(), 0);

    inventory.create(Some(&manager), buns("b1", 5.0, 1.0)).unwrap();
    let created = inventory
        .bulk_create(
            Some(&manager),
            vec![buns("b1", 0.0, 1.0), buns("b2", 0.0, 1.0), buns("b3", 9.0, 1.0)],
        )
        .unwrap();
    assert_eq!(created, 2);

    let items = inventory.list(Some(&manager)).unwrap();
    assert_eq!(items.len(), 3);
    let b1 = items.iter().find(|i| i.id == "b1").unwrap();
    assert_eq!(b1.on_hand(), 5.0);
    assert_consistent(&fx);
}

#[test]
fn test_rejects_bad_payloads_and_unknown_items() {
    let fx = Fixture::new();
    let inventory = fx.state.inventory();
    let manager = fx.bearer("manager");

    let err = inventory
        .create(Some(&manager), buns("bad", f64::NAN, 1.0))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let err = inventory
        .receive_stock(Some(&manager), "ghost", 1.0)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InventoryItemNotFound);

    inventory.create(Some(&manager), buns("b1", 1.0, 1.0)).unwrap();
    let err = inventory
        .receive_stock(Some(&manager), "b1", f64::INFINITY)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InventoryInvalidQuantity);

    let err = inventory
        .create(Some(&manager), buns("b1", 1.0, 1.0))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AlreadyExists);
}

#[test]
fn test_incoming_status_is_ignored() {
    let json = r#"[{
        "id": "x", "name": "Lettuce", "sku": "LET", "onHand": 0, "parLevel": 5,
        "unit": "head", "unitCost": 1.0, "status": "In Stock"
    }]"#;
    let payloads: Vec<InventoryItemCreate> = serde_json::from_str(json).unwrap();

    let fx = Fixture::new();
    let inventory = fx.state.inventory();
    inventory
        .bulk_create(Some(&fx.bearer("manager")), payloads)
        .unwrap();
    let items = fx.state.stores().inventory_snapshot();
    assert_eq!(items[0].status(), StockStatus::OutOfStock);
}

#[test]
fn test_sku_is_unique_across_writes() {
    let fx = Fixture::new();
    let inventory = fx.state.inventory();
    let manager = fx.bearer("manager");
    inventory.create(Some(&manager), buns("b1", 5.0, 1.0)).unwrap();

    let mut clash = buns("b2", 5.0, 1.0);
    clash.sku = "SKU-b1".to_string();
    let err = inventory.create(Some(&manager), clash.clone()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InventorySkuExists);
    assert_eq!(err.detail_str("sku"), Some("SKU-b1"));

    // One clash fails the whole batch
    let err = inventory
        .bulk_create(Some(&manager), vec![buns("b3", 1.0, 1.0), clash])
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InventorySkuExists);
    let mut twin = buns("b5", 1.0, 1.0);
    twin.sku = "SKU-b4".to_string();
    let err = inventory
        .bulk_create(Some(&manager), vec![buns("b4", 1.0, 1.0), twin])
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InventorySkuExists);
    assert_eq!(inventory.list(Some(&manager)).unwrap().len(), 1);

    inventory.create(Some(&manager), buns("b2", 5.0, 1.0)).unwrap();
    let err = inventory
        .update(
            Some(&manager),
            "b2",
            InventoryItemUpdate {
                sku: Some("SKU-b1".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InventorySkuExists);

    // Keeping its own SKU is not a clash
    let write = inventory
        .update(
            Some(&manager),
            "b2",
            InventoryItemUpdate {
                sku: Some("SKU-b2".to_string()),
                name: Some("Brioche".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(write.item.name, "Brioche");
}
