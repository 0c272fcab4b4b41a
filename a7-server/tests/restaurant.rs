mod common;

use common::{Fixture, OTHER_RESTAURANT, RESTAURANT, add_staff_to};
use shared::analytics::TimeRange;
use shared::error::ErrorCode;
use shared::inventory::InventoryItemCreate;
use shared::models::{RestaurantUpdate, SettingsUpdate};
use shared::permissions::Role;

// 2026-06-15 12:00 UTC
const NOON_UTC: i64 = 1_781_524_800_000;

fn with_rival() -> Fixture {
    let fx = Fixture::new();
    add_staff_to(&fx.state, "rival", Role::Manager, OTHER_RESTAURANT);
    fx
}

#[test]
fn test_other_restaurant_staff_are_refused_everywhere() {
    let fx = with_rival();
    let manager = fx.bearer("manager");
    fx.state
        .inventory()
        .create(
            Some(&manager),
            InventoryItemCreate {
                id: Some("buns".to_string()),
                name: "Buns".to_string(),
                sku: "BUN".to_string(),
                on_hand: 10.0,
                par_level: 5.0,
                unit: "pcs".to_string(),
                unit_cost: 0.3,
            },
        )
        .unwrap();

    let rival = fx.bearer_for("rival", OTHER_RESTAURANT);
    let err = fx.state.inventory().list(Some(&rival)).unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(err.detail_str("restaurant"), Some(OTHER_RESTAURANT));

    assert!(fx.state.orders().list(Some(&rival)).unwrap_err().is_forbidden());
    assert!(fx.state.tables().list(Some(&rival)).unwrap_err().is_forbidden());
    assert!(fx.state.menu().list(Some(&rival)).unwrap_err().is_forbidden());
    assert!(fx.state.restaurant().get(Some(&rival)).unwrap_err().is_forbidden());
    assert!(
        fx.state
            .staff()
            .toggle_clock(Some(&rival), "rival")
            .unwrap_err()
            .is_forbidden()
    );
    assert!(
        fx.state
            .dashboard()
            .metrics_at(Some(&rival), TimeRange::Today, NOON_UTC)
            .unwrap_err()
            .is_forbidden()
    );
}

#[test]
fn test_dashboard_counts_only_own_staff() {
    let fx = with_rival();
    // Clocked in at the other restaurant
    fx.state.stores().staff.get_mut("rival").unwrap().is_active = true;
    fx.state
        .staff()
        .toggle_clock(Some(&fx.bearer("server")), "server")
        .unwrap();

    let metrics = fx
        .state
        .dashboard()
        .metrics_at(Some(&fx.bearer("manager")), TimeRange::Today, NOON_UTC)
        .unwrap();
    assert_eq!(metrics.staff_on_duty, 1);

    let staff = fx.state.staff().list(Some(&fx.bearer("manager"))).unwrap();
    assert!(staff.iter().all(|m| m.restaurant_id == RESTAURANT));
    assert_eq!(staff.len(), 4);
}

#[test]
fn test_restaurant_profile_read_and_update() {
    let fx = Fixture::new();
    let restaurant = fx.state.restaurant();

    let profile = restaurant.get(Some(&fx.bearer("kitchen"))).unwrap();
    assert_eq!(profile.id, RESTAURANT);
    assert_eq!(profile.timezone, "America/New_York");

    let update = RestaurantUpdate {
        name: Some("A7 Bistro".to_string()),
        email: Some("hello@a7bistro.example".to_string()),
        ..Default::default()
    };
    let err = restaurant
        .update(Some(&fx.bearer("server")), update.clone())
        .unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(err.detail_str("required"), Some("manage_restaurant"));

    let updated = restaurant.update(Some(&fx.bearer("manager")), update).unwrap();
    assert_eq!(updated.name, "A7 Bistro");
    assert_eq!(updated.timezone, "America/New_York");
    assert_eq!(
        restaurant.get(Some(&fx.bearer("cashier"))).unwrap().name,
        "A7 Bistro"
    );

    let err = restaurant
        .update(
            Some(&fx.bearer("manager")),
            RestaurantUpdate {
                email: Some("not-an-email".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[test]
fn test_missing_restaurant_record_is_not_found() {
    let fx = Fixture::new();
    fx.state.stores().restaurants.clear();
    let err = fx
        .state
        .restaurant()
        .get(Some(&fx.bearer("manager")))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RestaurantNotFound);

    let err = fx
        .state
        .restaurant()
        .update(
            Some(&fx.bearer("manager")),
            RestaurantUpdate {
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RestaurantNotFound);
}

#[test]
fn test_settings_created_with_defaults_on_first_save() {
    let fx = Fixture::new();
    let settings = fx.state.settings();
    let manager = fx.bearer("manager");

    let err = settings.get(Some(&manager)).unwrap_err();
    assert_eq!(err.code, ErrorCode::SettingsNotFound);

    let saved = settings
        .update(
            Some(&manager),
            SettingsUpdate {
                pin_length: Some(6),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(saved.pin_length, 6);
    assert_eq!(saved.tax_rate, 0.08);
    assert_eq!(saved.kds_refresh_rate, 5);
    assert_eq!(saved.restaurant_id, RESTAURANT);

    let again = settings
        .update(
            Some(&manager),
            SettingsUpdate {
                tax_rate: Some(0.1),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(again.id, saved.id);
    assert_eq!(again.pin_length, 6);
    assert_eq!(again.tax_rate, 0.1);
    assert_eq!(settings.get(Some(&manager)).unwrap(), again);
}

#[test]
fn test_settings_bounds_and_permissions() {
    let fx = Fixture::new();
    let settings = fx.state.settings();
    let manager = fx.bearer("manager");

    for bad in [
        SettingsUpdate {
            tax_rate: Some(1.5),
            ..Default::default()
        },
        SettingsUpdate {
            pin_length: Some(7),
            ..Default::default()
        },
        SettingsUpdate {
            kds_refresh_rate: Some(121),
            ..Default::default()
        },
    ] {
        let err = settings.update(Some(&manager), bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
    // A rejected update creates nothing
    assert_eq!(
        settings.get(Some(&manager)).unwrap_err().code,
        ErrorCode::SettingsNotFound
    );

    let err = settings.get(Some(&fx.bearer("cashier"))).unwrap_err();
    assert_eq!(err.detail_str("required"), Some("view_settings"));
    let err = settings
        .update(Some(&fx.bearer("server")), SettingsUpdate::default())
        .unwrap_err();
    assert_eq!(err.detail_str("required"), Some("manage_settings"));
}
