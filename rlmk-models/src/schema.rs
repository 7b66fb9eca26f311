//! Database schema definitions and table creation.
//!
//! Column names follow the French storage vocabulary (`nom`, `foyer_id`,
//! `quantite`, ...). Models translate them to English field names.

use rusqlite::Connection;
use rlmk_core::error::{RlmkError, RlmkResult};
use tracing::info;

/// Create all database tables and indexes if they do not exist.
pub fn create_tables(conn: &Connection) -> RlmkResult<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| RlmkError::Database(format!("failed to create schema: {e}")))?;
    info!("database schema verified");
    Ok(())
}

/// Drop all tables (used for database reset).
pub fn drop_tables(conn: &Connection) -> RlmkResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS mesures;
         DROP TABLE IF EXISTS plantes;
         DROP TABLE IF EXISTS esp32;
         DROP TABLE IF EXISTS aliments;
         DROP TABLE IF EXISTS stocks;
         DROP TABLE IF EXISTS pieces;
         DROP TABLE IF EXISTS foyer_membres;
         DROP TABLE IF EXISTS utilisateurs;
         DROP TABLE IF EXISTS foyers;
         DROP TABLE IF EXISTS schema_version;",
    )
    .map_err(|e| RlmkError::Database(format!("failed to drop tables: {e}")))?;
    Ok(())
}

/// Every table created by [`create_tables`].
pub const TABLES: &[&str] = &[
    "schema_version",
    "foyers",
    "utilisateurs",
    "foyer_membres",
    "pieces",
    "stocks",
    "aliments",
    "esp32",
    "plantes",
    "mesures",
];

/// Complete SQL schema for all tables.
const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

-- Households
CREATE TABLE IF NOT EXISTS foyers (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    nom             TEXT NOT NULL,
    adresse         TEXT,
    date_creation   TEXT NOT NULL
);

-- Users
CREATE TABLE IF NOT EXISTS utilisateurs (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    email           TEXT NOT NULL UNIQUE,
    mot_de_passe    TEXT NOT NULL,
    prenom          TEXT NOT NULL,
    nom             TEXT NOT NULL,
    date_creation   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_utilisateurs_email ON utilisateurs(email);

-- Household membership
CREATE TABLE IF NOT EXISTS foyer_membres (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    foyer_id        INTEGER NOT NULL REFERENCES foyers(id) ON DELETE CASCADE,
    utilisateur_id  INTEGER NOT NULL REFERENCES utilisateurs(id) ON DELETE CASCADE,
    role            TEXT NOT NULL CHECK (role IN ('admin', 'member')),
    date_ajout      TEXT NOT NULL,
    UNIQUE(foyer_id, utilisateur_id)
);

CREATE INDEX IF NOT EXISTS idx_foyer_membres_utilisateur ON foyer_membres(utilisateur_id);

-- Rooms
CREATE TABLE IF NOT EXISTS pieces (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    nom             TEXT NOT NULL,
    type_piece      TEXT,
    foyer_id        INTEGER NOT NULL REFERENCES foyers(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_pieces_foyer ON pieces(foyer_id);

-- Stocks (fridge, pantry, ...)
CREATE TABLE IF NOT EXISTS stocks (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    nom             TEXT NOT NULL,
    type_stock      TEXT,
    piece_id        INTEGER NOT NULL REFERENCES pieces(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_stocks_piece ON stocks(piece_id);

-- Food items
CREATE TABLE IF NOT EXISTS aliments (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    nom             TEXT NOT NULL,
    quantite        REAL NOT NULL DEFAULT 0,
    unite           TEXT,
    categorie       TEXT,
    date_peremption TEXT,
    stock_id        INTEGER NOT NULL REFERENCES stocks(id) ON DELETE CASCADE,
    date_ajout      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_aliments_stock ON aliments(stock_id);
CREATE INDEX IF NOT EXISTS idx_aliments_peremption ON aliments(date_peremption);

-- ESP32 devices
CREATE TABLE IF NOT EXISTS esp32 (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    nom                 TEXT NOT NULL,
    adresse_mac         TEXT NOT NULL UNIQUE,
    foyer_id            INTEGER REFERENCES foyers(id) ON DELETE SET NULL,
    derniere_connexion  TEXT
);

CREATE INDEX IF NOT EXISTS idx_esp32_foyer ON esp32(foyer_id);

-- Plants
CREATE TABLE IF NOT EXISTS plantes (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    nom             TEXT NOT NULL,
    espece          TEXT,
    foyer_id        INTEGER NOT NULL REFERENCES foyers(id) ON DELETE CASCADE,
    piece_id        INTEGER REFERENCES pieces(id) ON DELETE SET NULL,
    esp32_id        INTEGER REFERENCES esp32(id) ON DELETE SET NULL,
    seuil_humidite  REAL,
    date_creation   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_plantes_foyer ON plantes(foyer_id);

-- Sensor readings
CREATE TABLE IF NOT EXISTS mesures (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    esp32_id        INTEGER NOT NULL REFERENCES esp32(id) ON DELETE CASCADE,
    type            TEXT NOT NULL,
    valeur          REAL NOT NULL,
    date_mesure     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_mesures_esp32_date ON mesures(esp32_id, date_mesure);
"#;
