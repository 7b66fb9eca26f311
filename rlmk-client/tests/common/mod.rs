//! Runs a real server on an ephemeral port for client tests.

#![allow(dead_code)]

use tempfile::TempDir;

use rlmk_client::{ApiClient, RetryConfig};
use rlmk_core::config::{AppConfig, ClientConfig};
use rlmk_models::Database;
use rlmk_server::{build_router, AppState};
use rlmk_services::ServiceRegistry;

pub struct TestServer {
    pub base_url: String,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "client-test-secret".into();
        config.auth.bcrypt_cost = 4;

        let database = Database::init(&dir.path().join("test.db"), &config.database)
            .expect("failed to init test database");
        let mut registry = ServiceRegistry::new(config, database);
        registry.init_all().expect("failed to init services");
        let app = build_router(AppState::new(registry));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            _dir: dir,
        }
    }

    pub fn client(&self) -> ApiClient {
        let config = ClientConfig {
            api_url: self.base_url.clone(),
            api_timeout_ms: 5000,
        };
        ApiClient::new(&config)
            .unwrap()
            .with_retry_config(RetryConfig::none())
    }
}
