//! Shared helpers for router tests: an app over a temporary database and
//! request/response plumbing.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use rlmk_core::config::AppConfig;
use rlmk_core::logging::init_console_logging;
use rlmk_models::Database;
use rlmk_server::{build_router, AppState};
use rlmk_services::ServiceRegistry;

pub struct TestApp {
    pub router: Router,
    pub database: Database,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Router over a registry whose services were never initialized.
    pub fn without_services() -> Self {
        Self::build(false)
    }

    fn build(init_services: bool) -> Self {
        init_console_logging("warn");
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "router-test-secret".into();
        config.auth.bcrypt_cost = 4;

        let database = Database::init(&dir.path().join("test.db"), &config.database)
            .expect("failed to init test database");
        let mut registry = ServiceRegistry::new(config, database.clone());
        if init_services {
            registry.init_all().expect("failed to init services");
        }

        Self {
            router: build_router(AppState::new(registry)),
            database,
            _dir: dir,
        }
    }

    /// Send a request and return the status with the parsed JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register a user, optionally with a new household. Returns
    /// (token, user id, household id).
    pub async fn register(&self, email: &str, household: Option<&str>) -> (String, i64, Option<i64>) {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                serde_json::json!({
                    "email": email,
                    "password": "s3cret-pass",
                    "firstName": "Lou",
                    "lastName": "Garnier",
                    "householdName": household,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap(),
            body["households"][0]["id"].as_i64(),
        )
    }
}
