//! Service trait and lifecycle management.
//!
//! All services implement the `Service` trait which provides a standard
//! lifecycle (init, shutdown) and health checking interface.

use rlmk_core::error::RlmkResult;

/// Lifecycle state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Service has been created but not initialized.
    Created,
    /// Service is running and ready.
    Running,
    /// Service has been stopped.
    Stopped,
    /// Service encountered a fatal error.
    Failed,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Trait that all RLMK services implement.
///
/// Services are initialized in dependency order by the ServiceRegistry.
pub trait Service: Send + Sync {
    /// Human-readable name of this service.
    fn name(&self) -> &str;

    /// Current state of this service.
    fn state(&self) -> ServiceState;

    /// Initialize the service. Called once during application startup.
    fn init(&mut self) -> RlmkResult<()>;

    /// Gracefully shut down the service.
    fn shutdown(&mut self) -> RlmkResult<()>;

    /// Health check. Returns true if the service is operational.
    fn is_healthy(&self) -> bool {
        self.state() == ServiceState::Running
    }
}

/// Implements [`Service`] for a struct with a `state: ServiceState` field
/// and no startup work.
macro_rules! simple_service {
    ($ty:ty, $name:literal) => {
        impl $crate::service::Service for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn state(&self) -> $crate::service::ServiceState {
                self.state
            }

            fn init(&mut self) -> rlmk_core::error::RlmkResult<()> {
                self.state = $crate::service::ServiceState::Running;
                tracing::debug!("{} service ready", $name);
                Ok(())
            }

            fn shutdown(&mut self) -> rlmk_core::error::RlmkResult<()> {
                self.state = $crate::service::ServiceState::Stopped;
                Ok(())
            }
        }
    };
}

pub(crate) use simple_service;
