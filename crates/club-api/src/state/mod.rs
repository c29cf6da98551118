//! Application state
//!
//! Holds the shared state for the Axum application: the service context and
//! the readiness check used by `/health/ready`.

use std::sync::Arc;

use async_trait::async_trait;
use club_db::PgPool;
use club_service::ServiceContext;

/// Dependency check behind the readiness endpoint
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn database_ready(&self) -> bool;
}

#[async_trait]
impl ReadinessCheck for PgPool {
    async fn database_ready(&self) -> bool {
        club_db::ping(self).await.is_ok()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    readiness: Arc<dyn ReadinessCheck>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, readiness: Arc<dyn ReadinessCheck>) -> Self {
        Self {
            service_context: Arc::new(service_context),
            readiness,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn readiness(&self) -> &dyn ReadinessCheck {
        self.readiness.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("readiness", &"ReadinessCheck")
            .finish()
    }
}
