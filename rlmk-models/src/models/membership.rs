//! Household membership entity model.
//!
//! Links a user to a household with a role (`admin` or `member`). The role
//! set is enforced by a CHECK constraint in storage and validated by the
//! household service before any write.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::{is_constraint_violation, now_timestamp};

/// A (household, user, role) membership row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Option<i64>,
    pub household_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: String,
}

/// A household member as listed in the users tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub joined_at: String,
}

/// One of a user's households with the user's role in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHousehold {
    pub id: i64,
    pub name: String,
    pub role: String,
}

impl Membership {
    /// Create an unsaved membership.
    pub fn new(household_id: i64, user_id: i64, role: impl Into<String>) -> Self {
        Self {
            id: None,
            household_id,
            user_id,
            role: role.into(),
            joined_at: now_timestamp(),
        }
    }

    /// Construct a Membership from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            household_id: row.get("foyer_id")?,
            user_id: row.get("utilisateur_id")?,
            role: row.get("role")?,
            joined_at: row.get("date_ajout")?,
        })
    }

    /// Find the membership of a user in a household.
    pub fn find(conn: &Connection, household_id: i64, user_id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row(
            "SELECT * FROM foyer_membres WHERE foyer_id = ?1 AND utilisateur_id = ?2",
            [household_id, user_id],
            Self::from_row,
        ) {
            Ok(m) => Ok(Some(m)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    /// Insert this membership. An existing (household, user) pair is a
    /// validation error.
    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO foyer_membres (foyer_id, utilisateur_id, role, date_ajout)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.household_id, self.user_id, self.role, self.joined_at],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                RlmkError::validation("User is already a member of this household")
            } else {
                RlmkError::Database(e.to_string())
            }
        })?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Change the role of a membership. Returns false when there is none.
    pub fn update_role(
        conn: &Connection,
        household_id: i64,
        user_id: i64,
        role: &str,
    ) -> RlmkResult<bool> {
        let changed = conn
            .execute(
                "UPDATE foyer_membres SET role = ?1 WHERE foyer_id = ?2 AND utilisateur_id = ?3",
                params![role, household_id, user_id],
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    /// Remove a user from a household. Returns false when there was no membership.
    pub fn delete(conn: &Connection, household_id: i64, user_id: i64) -> RlmkResult<bool> {
        let changed = conn
            .execute(
                "DELETE FROM foyer_membres WHERE foyer_id = ?1 AND utilisateur_id = ?2",
                [household_id, user_id],
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    /// Households of a user, oldest membership first. The first entry is the
    /// user's primary household.
    pub fn households_for_user(conn: &Connection, user_id: i64) -> RlmkResult<Vec<UserHousehold>> {
        let mut stmt = conn
            .prepare(
                "SELECT f.id, f.nom, m.role FROM foyer_membres m
                 INNER JOIN foyers f ON f.id = m.foyer_id
                 WHERE m.utilisateur_id = ?1
                 ORDER BY m.date_ajout ASC, m.id ASC",
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([user_id], |row| {
                Ok(UserHousehold {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    role: row.get(2)?,
                })
            })
            .map_err(|e| RlmkError::Database(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RlmkError::Database(e.to_string()))?;

        Ok(rows)
    }
}

impl Member {
    /// Construct a Member from a users/membership join row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get("utilisateur_id")?,
            email: row.get("email")?,
            first_name: row.get("prenom")?,
            last_name: row.get("nom")?,
            role: row.get("role")?,
            joined_at: row.get("date_ajout")?,
        })
    }

    /// All members of a household, in join order.
    pub fn list_for_household(conn: &Connection, household_id: i64) -> RlmkResult<Vec<Self>> {
        let mut stmt = conn
            .prepare(
                "SELECT m.utilisateur_id, u.email, u.prenom, u.nom, m.role, m.date_ajout
                 FROM foyer_membres m
                 INNER JOIN utilisateurs u ON u.id = m.utilisateur_id
                 WHERE m.foyer_id = ?1
                 ORDER BY m.date_ajout ASC, m.id ASC",
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;

        let members = stmt
            .query_map([household_id], Self::from_row)
            .map_err(|e| RlmkError::Database(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RlmkError::Database(e.to_string()))?;

        Ok(members)
    }

    /// Whether this member administers the household.
    pub fn is_admin(&self) -> bool {
        self.role == rlmk_core::constants::roles::ADMIN
    }
}
