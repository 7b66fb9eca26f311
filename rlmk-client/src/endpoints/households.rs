//! Household and membership endpoints.

use rlmk_core::error::RlmkResult;
use rlmk_models::api::{AddMemberRequest, CreateHouseholdRequest, SuccessResponse, UpdateRoleRequest};
use rlmk_models::{Household, Member, Membership, UserHousehold};

use crate::client::ApiClient;

impl ApiClient {
    pub async fn list_households(&self) -> RlmkResult<Vec<UserHousehold>> {
        self.get_json("/foyers").await
    }

    pub async fn create_household(&self, req: &CreateHouseholdRequest) -> RlmkResult<Household> {
        self.post_json("/foyers", req).await
    }

    pub async fn list_members(&self, household_id: i64) -> RlmkResult<Vec<Member>> {
        self.get_json(&format!("/foyers/{household_id}/members")).await
    }

    /// Add an existing user, by email, to a household.
    pub async fn add_member(&self, household_id: i64, email: &str, role: &str) -> RlmkResult<Member> {
        let req = AddMemberRequest {
            email: Some(email.to_string()),
            role: Some(role.to_string()),
        };
        self.post_json(&format!("/foyers/{household_id}/members"), &req).await
    }

    pub async fn update_member_role(&self, household_id: i64, user_id: i64, role: &str) -> RlmkResult<Membership> {
        let req = UpdateRoleRequest {
            role: Some(role.to_string()),
        };
        self.put_json(&format!("/foyers/{household_id}/members/{user_id}"), &req)
            .await
    }

    pub async fn remove_member(&self, household_id: i64, user_id: i64) -> RlmkResult<SuccessResponse> {
        self.delete_json(&format!("/foyers/{household_id}/members/{user_id}"))
            .await
    }
}
