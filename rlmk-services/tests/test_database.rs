//! Integration tests for database lifecycle and query helpers.

mod common;

use chrono::NaiveDate;
use rlmk_core::constants::DB_SCHEMA_VERSION;
use rlmk_models::migrations::schema_version;
use rlmk_models::queries::{self, FoodItemFilter, StockFilter};
use rlmk_models::Database;
use rlmk_core::config::DatabaseConfig;

#[test]
fn fresh_database_is_at_latest_schema() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), DB_SCHEMA_VERSION);
    db.run_integrity_check().unwrap();
}

#[test]
fn reopening_keeps_data() {
    let (db, dir) = common::create_test_db();
    common::seed_test_data(&db);
    drop(db);

    let db = Database::init(&dir.path().join("test.db"), &DatabaseConfig::default()).unwrap();
    let stats = db.stats().unwrap();
    assert_eq!(stats.households, 2);
    assert_eq!(stats.food_items, 5);
    assert_eq!(stats.readings, 4);
}

#[test]
fn reset_empties_every_table() {
    let (db, _dir) = common::create_test_db();
    common::seed_test_data(&db);
    db.reset().unwrap();
    assert!(db.stats().unwrap().rows().iter().all(|(_, n)| *n == 0));
}

#[test]
fn listings_respect_household_boundary() {
    let (db, _dir) = common::create_test_db();
    let seeded = common::seed_test_data(&db);
    let conn = db.conn().unwrap();

    assert_eq!(queries::list_rooms(&conn, Some(seeded.household)).unwrap().len(), 2);
    assert_eq!(queries::list_plants(&conn, Some(seeded.other_household)).unwrap().len(), 1);
    assert_eq!(
        queries::list_stocks(&conn, &StockFilter { room_id: Some(seeded.kitchen), household_id: None })
            .unwrap()
            .len(),
        2
    );

    let low = queries::list_food_items(
        &conn,
        &FoodItemFilter { household_id: Some(seeded.household), low_stock: true, ..Default::default() },
    )
    .unwrap();
    assert_eq!(low.len(), 3);
}

#[test]
fn expiring_soon_window_is_three_days() {
    let (db, _dir) = common::create_test_db();
    let seeded = common::seed_test_data(&db);
    let conn = db.conn().unwrap();

    let near_far_future = NaiveDate::from_ymd_opt(2998, 12, 29).unwrap();
    let counts = queries::dashboard_counts(&conn, seeded.household, near_far_future).unwrap();
    // Lait (2000-01-01) and Pâtes (2999-01-01)
    assert_eq!(counts.expiring_soon, 2);

    let before = NaiveDate::from_ymd_opt(2998, 12, 28).unwrap();
    let counts = queries::dashboard_counts(&conn, seeded.household, before).unwrap();
    assert_eq!(counts.expiring_soon, 1);
}
