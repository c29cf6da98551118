//! Test helpers for integration tests
//!
//! Provides a wired service context over the in-memory adapters, a spawned
//! HTTP server, and assertions on the JSON envelope.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use club_api::middleware::apply_middleware_with_config;
use club_api::routes::create_router;
use club_api::{create_app, AppState, ReadinessCheck};
use club_common::{try_init_tracing, CorsConfig, InviteConfig, InvitePolicy, RateLimitConfig};
use club_service::{ServiceContext, ServiceContextBuilder};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::memory::{MemoryIdentityProvider, MemoryStore};

pub const FRONTEND_URL: &str = "https://members.example.com";

/// In-memory backends plus a service context wired to them
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub identity: Arc<MemoryIdentityProvider>,
    pub invites: InviteConfig,
    ctx: ServiceContext,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), InvitePolicy::OwnerOnly)
    }

    pub fn with_policy(policy: InvitePolicy) -> Self {
        Self::with_store(MemoryStore::new(), policy)
    }

    pub fn with_store(store: MemoryStore, policy: InvitePolicy) -> Self {
        // RUST_LOG=debug shows service spans; only the first call installs it
        let _ = try_init_tracing();

        let store = Arc::new(store);
        let identity = Arc::new(MemoryIdentityProvider::new());
        let invites = InviteConfig {
            frontend_url: FRONTEND_URL.to_string(),
            policy,
            ..InviteConfig::default()
        };
        let ctx = build_context(&store, &identity, invites.clone());
        Self {
            store,
            identity,
            invites,
            ctx,
        }
    }

    pub fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    /// A second context over the same backends, for handing to a server
    pub fn fresh_context(&self) -> ServiceContext {
        build_context(&self.store, &self.identity, self.invites.clone())
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn build_context(
    store: &Arc<MemoryStore>,
    identity: &Arc<MemoryIdentityProvider>,
    invites: InviteConfig,
) -> ServiceContext {
    ServiceContextBuilder::new()
        .club_repo(store.clone())
        .user_repo(store.clone())
        .member_repo(store.clone())
        .invite_repo(store.clone())
        .role_repo(store.clone())
        .email_queue(store.clone())
        .identity(identity.clone())
        .invite_config(invites)
        .build()
        .expect("every dependency is set")
}

/// Readiness check with a fixed answer
pub struct StaticReadiness(pub bool);

#[async_trait]
impl ReadinessCheck for StaticReadiness {
    async fn database_ready(&self) -> bool {
        self.0
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the app's backends on an ephemeral port
    pub async fn start(app: &TestApp) -> Result<Self> {
        Self::start_with_readiness(app, true).await
    }

    pub async fn start_with_readiness(app: &TestApp, database_ready: bool) -> Result<Self> {
        let state = AppState::new(
            app.fresh_context(),
            Arc::new(StaticReadiness(database_ready)),
        );
        Self::serve(create_app(state)).await
    }

    /// Serve the API routes behind the rate limiter
    pub async fn start_rate_limited(app: &TestApp, rate_limit: &RateLimitConfig) -> Result<Self> {
        let state = AppState::new(app.fresh_context(), Arc::new(StaticReadiness(true)));
        let router =
            apply_middleware_with_config(create_router(), rate_limit, &CorsConfig::default(), false)?;
        Self::serve(router.with_state(state)).await
    }

    async fn serve(router: Router) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }
}

/// Response envelope as seen by a client
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub code: Option<String>,
}

/// Assert a successful status and return the envelope's `data`
pub async fn assert_data<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    if !envelope.success {
        anyhow::bail!("Envelope reports failure: {body}");
    }
    envelope
        .data
        .ok_or_else(|| anyhow::anyhow!("Envelope has no data: {body}"))
}

/// Assert a failure status and return the envelope's error code
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(&body)?;
    if envelope.success || envelope.data.is_some() || envelope.error.is_none() {
        anyhow::bail!("Not a failure envelope: {body}");
    }
    envelope
        .code
        .ok_or_else(|| anyhow::anyhow!("Failure envelope has no code: {body}"))
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
