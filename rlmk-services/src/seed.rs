//! Sample household used by `rlmk db seed`.
//!
//! Inserts one household with rooms, stocks, food items, plants, a device and
//! a handful of readings so every dashboard tab has something to show.
//! Expiration dates are relative to `today` so the "expiring soon" count is
//! non-zero whenever the seed runs.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::info;

use rlmk_core::constants::roles;
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::{
    Database, Esp32Device, FoodItem, Household, Membership, Plant, Room, SensorReading, Stock, User,
};

/// Rows inserted by a seed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub household_id: i64,
    pub rooms: usize,
    pub stocks: usize,
    pub food_items: usize,
    pub plants: usize,
    pub devices: usize,
    pub readings: usize,
}

// (name, quantity, unit, category, days until expiration)
const FOOD: &[(&str, f64, &str, &str, Option<i64>)] = &[
    ("Lait", 1.0, "L", "Produits laitiers", Some(2)),
    ("Yaourts", 6.0, "pots", "Produits laitiers", Some(5)),
    ("Jambon", 2.0, "tranches", "Charcuterie", Some(-1)),
    ("Pâtes", 3.0, "paquets", "Épicerie", Some(365)),
    ("Riz", 1.5, "kg", "Épicerie", None),
    ("Café", 2.0, "paquets", "Boissons", Some(120)),
];

/// Insert the sample household in one transaction. When `owner_email` names a
/// registered user, that user becomes its admin.
pub fn seed_sample_household(
    database: &Database,
    owner_email: Option<&str>,
    today: NaiveDate,
) -> RlmkResult<SeedSummary> {
    let summary = database.transaction(|conn| {
        let mut summary = SeedSummary::default();

        let owner = match owner_email {
            Some(email) => Some(
                User::find_by_email(conn, email)?.ok_or_else(|| RlmkError::not_found("User"))?,
            ),
            None => None,
        };

        let mut household = Household::new("Maison exemple", Some("12 rue des Lilas, Lyon".into()));
        let household_id = household.save(conn)?;
        summary.household_id = household_id;

        if let Some(user_id) = owner.and_then(|u| u.id) {
            Membership::new(household_id, user_id, roles::ADMIN).save(conn)?;
        }

        let mut kitchen = Room::new("Cuisine", Some("cuisine".into()), household_id);
        let kitchen_id = kitchen.save(conn)?;
        let mut living = Room::new("Salon", Some("salon".into()), household_id);
        let living_id = living.save(conn)?;
        Room::new("Cellier", Some("rangement".into()), household_id).save(conn)?;
        summary.rooms = 3;

        let mut fridge = Stock::new("Réfrigérateur", Some("frigo".into()), kitchen_id);
        let fridge_id = fridge.save(conn)?;
        let mut cupboard = Stock::new("Placard", Some("placard".into()), kitchen_id);
        let cupboard_id = cupboard.save(conn)?;
        summary.stocks = 2;

        for (i, (name, quantity, unit, category, days)) in FOOD.iter().enumerate() {
            let stock_id = if i < 3 { fridge_id } else { cupboard_id };
            let mut item = FoodItem::new(*name, *quantity, stock_id);
            item.unit = Some(unit.to_string());
            item.category = Some(category.to_string());
            item.expiration_date = days.map(|d| (today + Duration::days(d)).format("%Y-%m-%d").to_string());
            item.save(conn)?;
            summary.food_items += 1;
        }

        let mac = format!("24:6F:28:00:{:02X}:{:02X}", (household_id >> 8) & 0xff, household_id & 0xff);
        let mut device = Esp32Device::new("Capteur salon", &mac, Some(household_id));
        let device_id = device.save(conn)?;
        summary.devices = 1;

        let mut monstera = Plant::new("Monstera", household_id);
        monstera.species = Some("Monstera deliciosa".into());
        monstera.room_id = Some(living_id);
        monstera.device_id = Some(device_id);
        monstera.moisture_threshold = Some(30.0);
        monstera.save(conn)?;

        let mut basil = Plant::new("Basilic", household_id);
        basil.species = Some("Ocimum basilicum".into());
        basil.room_id = Some(kitchen_id);
        basil.save(conn)?;
        summary.plants = 2;

        for (kind, value) in [
            ("humidity", 62.0),
            ("temperature", 21.5),
            ("light", 340.0),
            ("humidity", 58.0),
            ("temperature", 22.0),
            ("light", 410.0),
        ] {
            SensorReading::new(device_id, kind, value).save(conn)?;
            summary.readings += 1;
        }

        Ok(summary)
    })?;

    info!("seeded sample household {}", summary.household_id);
    Ok(summary)
}
