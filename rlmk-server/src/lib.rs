//! RLMK Server - HTTP API over the service layer.
//!
//! Builds the axum router (JSON routes under `/api`, bearer authentication,
//! CORS, request tracing) and runs it with graceful shutdown on Ctrl+C or
//! SIGTERM.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};

use rlmk_core::config::{AppConfig, ServerConfig};
use rlmk_core::constants::API_PREFIX;
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::Database;
use rlmk_services::ServiceRegistry;

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// CORS policy: the configured origins, or any origin when none are set.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60))
}

/// The complete application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.services.config.server);

    Router::new()
        .nest(API_PREFIX, routes::api_router())
        // One INFO line per response, so the default level shows traffic.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Open the database, start the services and serve until a shutdown signal.
pub async fn serve(config: AppConfig) -> RlmkResult<()> {
    config.require_jwt_secret()?;

    let db_path = config.effective_db_path()?;
    let database = Database::init(&db_path, &config.database)?;

    let mut registry = ServiceRegistry::new(config.clone(), database);
    registry.init_all()?;

    let app = build_router(AppState::new(registry.clone()));

    let address = config.bind_addr();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| RlmkError::Config(format!("failed to bind {address}: {e}")))?;
    info!("RLMK API listening on http://{address}{API_PREFIX}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    registry.shutdown_all();
    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
