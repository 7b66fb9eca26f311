//! Authentication service: password hashing, session tokens, login and
//! registration.
//!
//! Tokens are HS256 JWTs signed with the configured shared secret. A token
//! carries the user's household ids and the role held in the first joined
//! household. There is no refresh or revocation; a token stays valid until
//! it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use rlmk_core::config::AuthConfig;
use rlmk_core::constants::{roles, INVALID_CREDENTIALS};
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};
use rlmk_models::{Database, Household, Membership, User, UserHousehold};

use crate::service::{Service, ServiceState};
use crate::validation::{optional_text, require_text};

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    /// Role in the primary household, absent when the user has none.
    pub role: Option<String>,
    /// Primary household id.
    pub household_id: Option<i64>,
    /// All household ids the user belonged to at login.
    #[serde(default)]
    pub households: Vec<i64>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// The authenticated user's id.
    pub fn user_id(&self) -> RlmkResult<i64> {
        self.sub
            .parse()
            .map_err(|_| RlmkError::Token("malformed subject".into()))
    }
}

/// Service issuing and checking session tokens.
#[derive(Clone)]
pub struct AuthService {
    state: ServiceState,
    database: Database,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new AuthService.
    pub fn new(database: Database, config: AuthConfig) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            config,
        }
    }

    fn secret(&self) -> RlmkResult<&[u8]> {
        let secret = self.config.jwt_secret.trim();
        if secret.is_empty() {
            return Err(RlmkError::MissingConfig("jwt secret".into()));
        }
        Ok(secret.as_bytes())
    }

    /// Hash a password with bcrypt at the configured cost.
    pub fn hash_password(&self, password: &str) -> RlmkResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|e| RlmkError::Crypto(e.to_string()))
    }

    /// Compare a password with a stored hash. A corrupt hash never matches.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(ok) => ok,
            Err(e) => {
                warn!("unreadable password hash: {e}");
                false
            }
        }
    }

    /// Sign a token for a user and their households (first = primary).
    pub fn issue_token(&self, user: &User, households: &[UserHousehold]) -> RlmkResult<String> {
        let user_id = user
            .id
            .ok_or_else(|| RlmkError::Internal("cannot issue a token for an unsaved user".into()))?;
        let now = Utc::now();
        let primary = households.first();

        let claims = Claims {
            sub: user_id.to_string(),
            email: user.email.clone(),
            role: primary.map(|h| h.role.clone()),
            household_id: primary.map(|h| h.id),
            households: households.iter().map(|h| h.id).collect(),
            iat: now.timestamp(),
            exp: (now + Duration::days(self.config.token_ttl_days)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.secret()?))
            .map_err(|e| RlmkError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verify a token's signature and expiry.
    pub fn verify_token(&self, token: &str) -> RlmkResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &DecodingKey::from_secret(self.secret()?), &validation)
            .map(|data| data.claims)
            .map_err(|e| RlmkError::Token(e.to_string()))
    }

    /// Create an account. With `householdName`, also create a household
    /// administered by the new user, in the same transaction.
    pub fn register(&self, req: RegisterRequest) -> RlmkResult<AuthResponse> {
        let email = require_text(req.email, "email")?;
        if !email.contains('@') {
            return Err(RlmkError::validation("email is invalid"));
        }
        let password = req
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| RlmkError::validation("password is required"))?;
        let first_name = require_text(req.first_name, "firstName")?;
        let last_name = require_text(req.last_name, "lastName")?;
        let household_name = optional_text(req.household_name);

        let hash = self.hash_password(&password)?;

        let (user, households) = self.database.transaction(|conn| {
            let mut user = User::new(&email, hash, first_name, last_name);
            let user_id = user.save(conn)?;

            if let Some(name) = household_name {
                let household_id = Household::new(name, None).save(conn)?;
                Membership::new(household_id, user_id, roles::ADMIN).save(conn)?;
            }

            let households = Membership::households_for_user(conn, user_id)?;
            Ok((user, households))
        })?;

        info!("registered user {} ({} households)", user.email, households.len());
        let token = self.issue_token(&user, &households)?;
        Ok(AuthResponse {
            token,
            role: households.first().map(|h| h.role.clone()),
            user,
            households,
        })
    }

    /// Check credentials and sign a session token. Unknown email and wrong
    /// password fail with the same error.
    pub fn login(&self, req: LoginRequest) -> RlmkResult<AuthResponse> {
        let email = require_text(req.email, "email")?;
        let password = req
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| RlmkError::validation("password is required"))?;

        let conn = self.database.conn()?;
        let user = match User::find_by_email(&conn, &email)? {
            Some(user) if self.verify_password(&password, &user.password_hash) => user,
            _ => {
                debug!("rejected login for {email}");
                return Err(RlmkError::AuthFailed(INVALID_CREDENTIALS.into()));
            }
        };

        let user_id = user
            .id
            .ok_or_else(|| RlmkError::Internal("stored user without id".into()))?;
        let households = Membership::households_for_user(&conn, user_id)?;
        let token = self.issue_token(&user, &households)?;

        info!("user {} logged in", user.email);
        Ok(AuthResponse {
            token,
            role: households.first().map(|h| h.role.clone()),
            user,
            households,
        })
    }

    /// Describe the session behind a verified token, with fresh memberships.
    pub fn me(&self, claims: &Claims) -> RlmkResult<MeResponse> {
        let user_id = claims.user_id()?;
        let conn = self.database.conn()?;
        let user = User::find_by_id(&conn, user_id)?
            .ok_or_else(|| RlmkError::Token("user no longer exists".into()))?;
        let households = Membership::households_for_user(&conn, user_id)?;

        Ok(MeResponse {
            user,
            role: households.first().map(|h| h.role.clone()),
            household_id: households.first().map(|h| h.id),
            households,
        })
    }
}

impl Service for AuthService {
    fn name(&self) -> &str {
        "auth"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> RlmkResult<()> {
        if let Err(e) = self.secret() {
            self.state = ServiceState::Failed;
            return Err(e);
        }
        self.state = ServiceState::Running;
        debug!("auth service ready (token ttl {} days)", self.config.token_ttl_days);
        Ok(())
    }

    fn shutdown(&mut self) -> RlmkResult<()> {
        self.state = ServiceState::Stopped;
        Ok(())
    }
}
