//! Shared test utilities for integration tests.

#![allow(dead_code)]

use rlmk_core::config::{AppConfig, DatabaseConfig};
use rlmk_models::api::RegisterRequest;
use rlmk_models::{Database, Esp32Device, FoodItem, Household, Membership, Plant, Room, SensorReading, Stock, User};
use rlmk_services::ServiceRegistry;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Create a temporary database with full schema and migrations applied.
/// Returns the Database and the TempDir (must be held alive for the duration of the test).
pub fn create_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::default();
    let db = Database::init(&path, &config).expect("failed to init test database");
    (db, dir)
}

/// Configuration with a signing secret and the cheapest bcrypt cost.
pub fn create_test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_SECRET.into();
    config.auth.bcrypt_cost = 4;
    config
}

/// An initialized registry over a fresh database.
pub fn create_test_registry() -> (ServiceRegistry, TempDir) {
    let (db, dir) = create_test_db();
    let mut registry = ServiceRegistry::new(create_test_config(), db);
    registry.init_all().expect("failed to init services");
    (registry, dir)
}

pub fn register_request(email: &str, household: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        email: Some(email.into()),
        password: Some("correct horse".into()),
        first_name: Some("Camille".into()),
        last_name: Some("Bernard".into()),
        household_name: household.map(String::from),
    }
}

/// Ids of the rows created by [`seed_test_data`].
pub struct Seeded {
    pub household: i64,
    pub other_household: i64,
    pub admin: i64,
    pub kitchen: i64,
    pub fridge: i64,
    pub pantry: i64,
    pub device: i64,
    pub plant: i64,
    pub plant_without_device: i64,
}

/// Seed the database with a realistic household.
///
/// Creates:
/// - 2 households, 2 users (admin + member of the first household)
/// - 2 rooms, 2 stocks, 5 food items (3 at or below the low-stock threshold)
/// - 1 device with 4 readings, 2 plants (one linked to the device)
/// - 1 room and 1 plant in the second household
pub fn seed_test_data(db: &Database) -> Seeded {
    let conn = db.conn().expect("failed to get connection for seeding");

    let household = Household::new("Maison", Some("1 rue de la Paix".into())).save(&conn).unwrap();
    let other_household = Household::new("Chalet", None).save(&conn).unwrap();

    let admin = User::new("admin@example.com", "x", "Ada", "Admin").save(&conn).unwrap();
    let member = User::new("member@example.com", "x", "Max", "Membre").save(&conn).unwrap();
    Membership::new(household, admin, "admin").save(&conn).unwrap();
    Membership::new(household, member, "member").save(&conn).unwrap();

    let kitchen = Room::new("Cuisine", Some("kitchen".into()), household).save(&conn).unwrap();
    let living = Room::new("Salon", None, household).save(&conn).unwrap();
    Room::new("Garage", None, other_household).save(&conn).unwrap();

    let fridge = Stock::new("Frigo", Some("fridge".into()), kitchen).save(&conn).unwrap();
    let pantry = Stock::new("Placard", Some("pantry".into()), kitchen).save(&conn).unwrap();

    for (name, qty, stock, exp) in [
        ("Lait", 1.0, fridge, Some("2000-01-01")),
        ("Yaourts", 2.0, fridge, None),
        ("Beurre", 0.5, fridge, None),
        ("Pâtes", 4.0, pantry, Some("2999-01-01")),
        ("Riz", 3.0, pantry, None),
    ] {
        let mut item = FoodItem::new(name, qty, stock);
        item.expiration_date = exp.map(String::from);
        item.save(&conn).unwrap();
    }

    let device = Esp32Device::new("Capteur salon", "AA:BB:CC:00:11:22", Some(household))
        .save(&conn)
        .unwrap();
    for (kind, value, ts) in [
        ("humidity", 40.0, "2024-05-01T10:00:00Z"),
        ("temperature", 20.0, "2024-05-01T10:00:00Z"),
        ("humidity", 55.0, "2024-05-01T11:00:00Z"),
        ("light", 300.0, "2024-05-01T11:00:00Z"),
    ] {
        let mut r = SensorReading::new(device, kind, value);
        r.timestamp = ts.into();
        r.save(&conn).unwrap();
    }

    let mut plant = Plant::new("Monstera", household);
    plant.room_id = Some(living);
    plant.device_id = Some(device);
    let plant = plant.save(&conn).unwrap();
    let plant_without_device = Plant::new("Cactus", household).save(&conn).unwrap();
    Plant::new("Sapin", other_household).save(&conn).unwrap();

    Seeded {
        household,
        other_household,
        admin,
        kitchen,
        fridge,
        pantry,
        device,
        plant,
        plant_without_device,
    }
}
