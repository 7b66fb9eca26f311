//! User entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::{is_constraint_violation, now_timestamp};

/// A registered user. The bcrypt hash is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<i64>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl User {
    /// Create an unsaved user. The email is normalized to lowercase.
    pub fn new(
        email: &str,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            email: normalize_email(email),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            created_at: now_timestamp(),
        }
    }

    /// Construct a User from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            password_hash: row.get("mot_de_passe")?,
            first_name: row.get("prenom")?,
            last_name: row.get("nom")?,
            created_at: row.get("date_creation")?,
        })
    }

    /// Find a user by ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row("SELECT * FROM utilisateurs WHERE id = ?1", [id], Self::from_row) {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    /// Find a user by email, case-insensitively.
    pub fn find_by_email(conn: &Connection, email: &str) -> RlmkResult<Option<Self>> {
        let email = normalize_email(email);
        match conn.query_row(
            "SELECT * FROM utilisateurs WHERE email = ?1",
            [&email],
            Self::from_row,
        ) {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    /// Insert this user. A duplicate email is reported as a validation error.
    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO utilisateurs (email, mot_de_passe, prenom, nom, date_creation)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.email,
                self.password_hash,
                self.first_name,
                self.last_name,
                self.created_at,
            ],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                RlmkError::validation("Email already in use")
            } else {
                RlmkError::Database(e.to_string())
            }
        })?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Lowercase and trim an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
