//! Entity model definitions.
//!
//! Each model reads its French storage columns in `from_row` and serializes
//! with English camelCase field names.

pub mod household;
pub mod user;
pub mod membership;
pub mod room;
pub mod stock;
pub mod food_item;
pub mod plant;
pub mod device;
pub mod sensor_reading;

/// Current UTC time as an RFC 3339 string, the storage format for timestamps.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Whether a rusqlite error is a UNIQUE/CHECK/FOREIGN KEY constraint violation.
pub(crate) fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
