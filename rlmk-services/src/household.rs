//! Household and membership management.

use tracing::info;

use rlmk_core::constants::roles;
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::{AddMemberRequest, CreateHouseholdRequest, UpdateRoleRequest};
use rlmk_models::{Database, Household, Member, Membership, User, UserHousehold};

use crate::service::{simple_service, ServiceState};
use crate::validation::{check_role, optional_text, require_text};

/// Service for households and their member lists.
#[derive(Clone)]
pub struct HouseholdService {
    state: ServiceState,
    database: Database,
}

simple_service!(HouseholdService, "household");

impl HouseholdService {
    pub fn new(database: Database) -> Self {
        Self {
            state: ServiceState::Created,
            database,
        }
    }

    /// Households the user belongs to, primary first.
    pub fn list_for_user(&self, user_id: i64) -> RlmkResult<Vec<UserHousehold>> {
        let conn = self.database.conn()?;
        Membership::households_for_user(&conn, user_id)
    }

    /// Create a household with the caller as its admin.
    pub fn create(&self, user_id: i64, req: CreateHouseholdRequest) -> RlmkResult<Household> {
        let name = require_text(req.name, "name")?;
        let address = optional_text(req.address);

        let household = self.database.transaction(|conn| {
            let mut household = Household::new(name, address);
            let id = household.save(conn)?;
            Membership::new(id, user_id, roles::ADMIN).save(conn)?;
            Ok(household)
        })?;

        info!("user {user_id} created household {:?} ({})", household.id, household.name);
        Ok(household)
    }

    /// Members of a household in join order.
    pub fn members(&self, household_id: i64) -> RlmkResult<Vec<Member>> {
        let conn = self.database.conn()?;
        if !Household::exists(&conn, household_id)? {
            return Err(RlmkError::not_found("Household"));
        }
        Member::list_for_household(&conn, household_id)
    }

    /// Add an existing user, found by email, to a household.
    pub fn add_member(&self, household_id: i64, req: AddMemberRequest) -> RlmkResult<Member> {
        let email = require_text(req.email, "email")?;
        let role = check_role(req.role)?;

        let conn = self.database.conn()?;
        if !Household::exists(&conn, household_id)? {
            return Err(RlmkError::not_found("Household"));
        }
        let user = User::find_by_email(&conn, &email)?.ok_or_else(|| RlmkError::not_found("User"))?;
        let user_id = user
            .id
            .ok_or_else(|| RlmkError::Internal("stored user without id".into()))?;

        let mut membership = Membership::new(household_id, user_id, role);
        membership.save(&conn)?;
        info!("added user {user_id} to household {household_id} as {}", membership.role);

        Ok(Member {
            user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: membership.role,
            joined_at: membership.joined_at,
        })
    }

    /// Change a member's role. The role is checked before any lookup.
    pub fn update_role(
        &self,
        household_id: i64,
        user_id: i64,
        req: UpdateRoleRequest,
    ) -> RlmkResult<Membership> {
        let role = check_role(req.role)?;
        let conn = self.database.conn()?;

        if !Membership::update_role(&conn, household_id, user_id, &role)? {
            return Err(RlmkError::not_found("Membership"));
        }
        info!("user {user_id} is now {role} of household {household_id}");

        Membership::find(&conn, household_id, user_id)?
            .ok_or_else(|| RlmkError::not_found("Membership"))
    }

    /// Remove a user from a household.
    pub fn remove_member(&self, household_id: i64, user_id: i64) -> RlmkResult<()> {
        let conn = self.database.conn()?;
        if !Membership::delete(&conn, household_id, user_id)? {
            return Err(RlmkError::not_found("Membership"));
        }
        info!("removed user {user_id} from household {household_id}");
        Ok(())
    }
}
