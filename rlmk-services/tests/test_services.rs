//! Integration tests for the services over a real database file.

mod common;

use rlmk_core::error::RlmkError;
use rlmk_models::api::{
    AddMemberRequest, CreateFoodItemRequest, CreateHouseholdRequest, CreateRoomRequest,
    FoodItemPatch, IngestReadingsRequest, LoginRequest, ReadingInput, RegisterDeviceRequest,
    RoomPatch, UpdateRoleRequest,
};
use rlmk_models::queries::FoodItemFilter;

// ---- Auth ----

#[test]
fn register_with_household_makes_user_admin() {
    let (registry, _dir) = common::create_test_registry();
    let resp = registry
        .auth
        .register(common::register_request("camille@example.com", Some("Appartement")))
        .unwrap();

    assert_eq!(resp.role.as_deref(), Some("admin"));
    assert_eq!(resp.households.len(), 1);
    assert_eq!(resp.households[0].name, "Appartement");

    let claims = registry.auth.verify_token(&resp.token).unwrap();
    let me = registry.auth.me(&claims).unwrap();
    assert_eq!(me.user.email, "camille@example.com");
    assert_eq!(me.household_id, Some(resp.households[0].id));
}

#[test]
fn register_requires_fields() {
    let (registry, _dir) = common::create_test_registry();
    let mut req = common::register_request("camille@example.com", None);
    req.first_name = None;
    let err = registry.auth.register(req).unwrap_err();
    assert_eq!(err.to_string(), "firstName is required");
}

#[test]
fn login_uses_first_joined_household_role() {
    let (registry, _dir) = common::create_test_registry();
    let first = registry
        .auth
        .register(common::register_request("owner@example.com", Some("Maison")))
        .unwrap();
    registry
        .auth
        .register(common::register_request("guest@example.com", Some("Studio")))
        .unwrap();

    registry
        .households
        .add_member(
            first.households[0].id,
            AddMemberRequest {
                email: Some("guest@example.com".into()),
                role: Some("member".into()),
            },
        )
        .unwrap();

    let resp = registry
        .auth
        .login(LoginRequest {
            email: Some("guest@example.com".into()),
            password: Some("correct horse".into()),
        })
        .unwrap();
    let claims = registry.auth.verify_token(&resp.token).unwrap();

    assert_eq!(claims.role.as_deref(), Some("admin"));
    assert_eq!(resp.households[0].name, "Studio");
    assert_eq!(claims.households.len(), 2);
}

// ---- Households ----

#[test]
fn membership_role_must_be_admin_or_member() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    let err = registry
        .households
        .update_role(seeded.household, seeded.admin, UpdateRoleRequest { role: Some("owner".into()) })
        .unwrap_err();
    assert!(matches!(err, RlmkError::Validation(_)));

    let updated = registry
        .households
        .update_role(seeded.household, seeded.admin, UpdateRoleRequest { role: Some("member".into()) })
        .unwrap();
    assert_eq!(updated.role, "member");
}

#[test]
fn missing_membership_is_not_found() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    let err = registry
        .households
        .update_role(seeded.other_household, seeded.admin, UpdateRoleRequest { role: Some("admin".into()) })
        .unwrap_err();
    assert!(matches!(err, RlmkError::NotFound(_)));

    let err = registry
        .households
        .remove_member(seeded.other_household, seeded.admin)
        .unwrap_err();
    assert!(matches!(err, RlmkError::NotFound(_)));

    registry.households.remove_member(seeded.household, seeded.admin).unwrap();
    assert_eq!(registry.households.members(seeded.household).unwrap().len(), 1);
}

#[test]
fn create_household_lists_it_for_creator() {
    let (registry, _dir) = common::create_test_registry();
    let resp = registry
        .auth
        .register(common::register_request("solo@example.com", None))
        .unwrap();
    let user_id = resp.user.id.unwrap();

    let err = registry
        .households
        .create(user_id, CreateHouseholdRequest::default())
        .unwrap_err();
    assert!(matches!(err, RlmkError::Validation(_)));

    registry
        .households
        .create(user_id, CreateHouseholdRequest { name: Some("Refuge".into()), address: None })
        .unwrap();
    let mine = registry.households.list_for_user(user_id).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].role, "admin");
}

// ---- Rooms & inventory ----

#[test]
fn room_update_and_delete_missing_rows() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    let renamed = registry
        .rooms
        .update(seeded.kitchen, RoomPatch { name: Some("Cuisine ouverte".into()), room_type: None })
        .unwrap();
    assert_eq!(renamed.name, "Cuisine ouverte");
    assert_eq!(renamed.room_type.as_deref(), Some("kitchen"));

    assert!(matches!(
        registry.rooms.update(9999, RoomPatch::default()),
        Err(RlmkError::NotFound(_))
    ));
    assert!(matches!(registry.rooms.delete(9999), Err(RlmkError::NotFound(_))));
}

#[test]
fn room_create_checks_household() {
    let (registry, _dir) = common::create_test_registry();
    let err = registry
        .rooms
        .create(CreateRoomRequest {
            name: Some("Bureau".into()),
            room_type: None,
            household_id: Some(404),
        })
        .unwrap_err();
    assert!(matches!(err, RlmkError::NotFound(_)));

    let err = registry
        .rooms
        .create(CreateRoomRequest { name: Some("Bureau".into()), ..Default::default() })
        .unwrap_err();
    assert_eq!(err.to_string(), "householdId is required");
}

#[test]
fn deleting_room_cascades_to_inventory() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    registry.rooms.delete(seeded.kitchen).unwrap();
    let items = registry
        .inventory
        .list_food_items(&FoodItemFilter { household_id: Some(seeded.household), ..Default::default() })
        .unwrap();
    assert!(items.is_empty());
}

#[test]
fn food_item_crud() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    let item = registry
        .inventory
        .create_food_item(CreateFoodItemRequest {
            name: Some("Fromage".into()),
            quantity: Some(1.0),
            unit: Some("pièce".into()),
            category: None,
            expiration_date: Some("2030-02-01".into()),
            stock_id: Some(seeded.fridge),
        })
        .unwrap();
    let id = item.id.unwrap();

    let moved = registry
        .inventory
        .update_food_item(
            id,
            FoodItemPatch { quantity: Some(5.0), stock_id: Some(seeded.pantry), ..Default::default() },
        )
        .unwrap();
    assert_eq!(moved.quantity, 5.0);
    assert_eq!(moved.stock_id, seeded.pantry);
    assert_eq!(moved.unit.as_deref(), Some("pièce"));

    let err = registry
        .inventory
        .create_food_item(CreateFoodItemRequest {
            name: Some("Fromage".into()),
            stock_id: Some(seeded.fridge),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "quantity is required");

    registry.inventory.delete_food_item(id).unwrap();
    assert!(matches!(registry.inventory.delete_food_item(id), Err(RlmkError::NotFound(_))));
}

// ---- Plants, devices, dashboard ----

#[test]
fn plant_history_is_normalized_newest_first() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    let history = registry.plants.history(seeded.plant, None).unwrap();
    assert_eq!(history.device_id, Some(seeded.device));
    assert_eq!(history.soil_moisture.len(), 2);
    assert_eq!(history.soil_moisture[0].value, 45.0);
    assert_eq!(history.soil_moisture[1].value, 60.0);
    assert_eq!(history.latest.temperature, Some(20.0));
    assert_eq!(history.latest.light, Some(300.0));

    let limited = registry.plants.history(seeded.plant, Some(1)).unwrap();
    assert_eq!(limited.soil_moisture.len() + limited.light.len(), 1);

    let empty = registry.plants.history(seeded.plant_without_device, None).unwrap();
    assert!(empty.soil_moisture.is_empty() && empty.temperature.is_empty() && empty.light.is_empty());

    assert!(matches!(registry.plants.history(9999, None), Err(RlmkError::NotFound(_))));
}

#[test]
fn ingest_readings_from_known_device() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    let resp = registry
        .devices
        .ingest(IngestReadingsRequest {
            mac_address: Some("aa-bb-cc-00-11-22".into()),
            readings: Some(vec![
                ReadingInput { reading_type: Some("humidity".into()), value: Some(10.0) },
                ReadingInput { reading_type: Some("temperature".into()), value: Some(23.0) },
            ]),
        })
        .unwrap();
    assert_eq!(resp.device_id, seeded.device);
    assert_eq!(resp.stored, 2);

    let history = registry.plants.history(seeded.plant, None).unwrap();
    assert_eq!(history.latest.soil_moisture, Some(90.0));

    let devices = registry.devices.list(Some(seeded.household)).unwrap();
    assert_eq!(devices[0].last_seen.as_deref(), Some(resp.last_seen.as_str()));
}

#[test]
fn ingest_rejects_unknown_device_and_bad_batches() {
    let (registry, _dir) = common::create_test_registry();
    common::seed_test_data(&registry.database);

    let err = registry
        .devices
        .ingest(IngestReadingsRequest {
            mac_address: Some("00:00:00:00:00:00".into()),
            readings: Some(vec![ReadingInput { reading_type: Some("light".into()), value: Some(1.0) }]),
        })
        .unwrap_err();
    assert!(matches!(err, RlmkError::NotFound(_)));

    let err = registry
        .devices
        .ingest(IngestReadingsRequest {
            mac_address: Some("AA:BB:CC:00:11:22".into()),
            readings: Some(vec![ReadingInput { reading_type: Some("light".into()), value: None }]),
        })
        .unwrap_err();
    assert!(matches!(err, RlmkError::Validation(_)));

    assert_eq!(registry.database.stats().unwrap().readings, 4);
}

#[test]
fn device_registration_rejects_duplicates() {
    let (registry, _dir) = common::create_test_registry();
    let req = RegisterDeviceRequest {
        name: Some("Capteur".into()),
        mac_address: Some("12:34:56:78:9a:bc".into()),
        household_id: None,
    };
    let device = registry.devices.register(req.clone()).unwrap();
    assert_eq!(device.mac_address, "12:34:56:78:9A:BC");
    assert!(matches!(registry.devices.register(req), Err(RlmkError::Validation(_))));
}

#[test]
fn dashboard_counts_match_rows() {
    let (registry, _dir) = common::create_test_registry();
    let seeded = common::seed_test_data(&registry.database);

    let counts = registry.dashboard.overview(Some(seeded.household)).unwrap();
    assert_eq!(counts.members, 2);
    assert_eq!(counts.rooms, 2);
    assert_eq!(counts.stocks, 2);
    assert_eq!(counts.food_items, 5);
    assert_eq!(counts.low_stock_items, 3);
    assert_eq!(counts.expiring_soon, 1);
    assert_eq!(counts.plants, 2);
    assert_eq!(counts.devices, 1);

    let other = registry.dashboard.overview(Some(seeded.other_household)).unwrap();
    assert_eq!(other.rooms, 1);
    assert_eq!(other.food_items, 0);

    assert!(matches!(registry.dashboard.overview(None), Err(RlmkError::Validation(_))));
}
