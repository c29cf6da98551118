//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use club_common::{AppConfig, AppError};
use club_db::{
    create_pool, run_migrations, PgClubRepository, PgEmailQueueRepository, PgInviteRepository,
    PgMemberRepository, PgRoleRepository, PgUserRepository, PoolConfig,
};
use club_identity::{GoTrueConfig, GoTrueIdentityProvider};
use club_service::{InviteService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How often expired invites are purged
const INVITE_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Build the application with the base middleware stack
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    apply_middleware(router).with_state(state)
}

/// Build the application with rate limiting and configured CORS
///
/// Health routes are merged after the limiter so health checks are never throttled.
pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Result<Router, AppError> {
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )
    .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(router
        .merge(apply_middleware(health_routes()))
        .with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let identity = GoTrueIdentityProvider::new(GoTrueConfig::from(&config.auth))
        .map_err(|e| AppError::IdentityProvider(e.to_string()))?;

    let service_context = ServiceContextBuilder::new()
        .club_repo(Arc::new(PgClubRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .invite_repo(Arc::new(PgInviteRepository::new(pool.clone())))
        .role_repo(Arc::new(PgRoleRepository::new(pool.clone())))
        .email_queue(Arc::new(PgEmailQueueRepository::new(pool.clone())))
        .identity(Arc::new(identity))
        .invite_config(config.invites.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, Arc::new(pool)))
}

/// Periodically delete invites past their expiry
///
/// The first sweep runs immediately. Failures are logged and retried on the
/// next tick.
pub fn spawn_invite_sweep(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        loop {
            ticker.tick().await;
            if let Err(e) = InviteService::new(state.service_context()).purge_expired().await {
                warn!(error = %e, "Expired invite sweep failed");
            }
        }
    })
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address: {e}")))?;

    let state = create_app_state(&config).await?;
    spawn_invite_sweep(state.clone(), INVITE_SWEEP_INTERVAL);
    let app = create_app_with_config(state, &config)?;

    run_server(app, addr).await
}
