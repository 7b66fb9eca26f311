//! Health and authentication endpoints.

use rlmk_core::error::RlmkResult;
use rlmk_models::api::{AuthResponse, HealthResponse, LoginRequest, MeResponse, RegisterRequest};

use crate::client::ApiClient;

impl ApiClient {
    /// Ping the server.
    pub async fn health(&self) -> RlmkResult<HealthResponse> {
        self.get_json("/health").await
    }

    /// Create an account. Stores the returned token on the client.
    pub async fn register(&self, req: &RegisterRequest) -> RlmkResult<AuthResponse> {
        let resp: AuthResponse = self.post_json("/auth/register", req).await?;
        self.set_token(Some(resp.token.clone())).await;
        Ok(resp)
    }

    /// Log in with email and password. Stores the returned token on the client.
    pub async fn login(&self, email: &str, password: &str) -> RlmkResult<AuthResponse> {
        let req = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let resp: AuthResponse = self.post_json("/auth/login", &req).await?;
        self.set_token(Some(resp.token.clone())).await;
        Ok(resp)
    }

    /// The logged-in user and their households.
    pub async fn me(&self) -> RlmkResult<MeResponse> {
        self.get_json("/auth/me").await
    }
}
