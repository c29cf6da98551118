//! Service context - dependency container for services
//!
//! Holds the repositories, the identity provider and the invite settings. It
//! is built once per process and shared; no user data lives in it.

use std::sync::Arc;

use club_common::InviteConfig;
use club_core::traits::{
    ClubRepository, EmailQueueRepository, IdentityProvider, InviteRepository, MemberRepository,
    RoleRepository, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    club_repo: Arc<dyn ClubRepository>,
    user_repo: Arc<dyn UserRepository>,
    member_repo: Arc<dyn MemberRepository>,
    invite_repo: Arc<dyn InviteRepository>,
    role_repo: Arc<dyn RoleRepository>,
    email_queue: Arc<dyn EmailQueueRepository>,

    // Identity provider
    identity: Arc<dyn IdentityProvider>,

    invites: InviteConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        club_repo: Arc<dyn ClubRepository>,
        user_repo: Arc<dyn UserRepository>,
        member_repo: Arc<dyn MemberRepository>,
        invite_repo: Arc<dyn InviteRepository>,
        role_repo: Arc<dyn RoleRepository>,
        email_queue: Arc<dyn EmailQueueRepository>,
        identity: Arc<dyn IdentityProvider>,
        invites: InviteConfig,
    ) -> Self {
        Self {
            club_repo,
            user_repo,
            member_repo,
            invite_repo,
            role_repo,
            email_queue,
            identity,
            invites,
        }
    }

    // === Repositories ===

    /// Get the club repository
    pub fn club_repo(&self) -> &dyn ClubRepository {
        self.club_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the invite repository
    pub fn invite_repo(&self) -> &dyn InviteRepository {
        self.invite_repo.as_ref()
    }

    /// Get the role repository
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    /// Get the notification outbox
    pub fn email_queue(&self) -> &dyn EmailQueueRepository {
        self.email_queue.as_ref()
    }

    // === Collaborators ===

    /// Get the identity provider
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn invite_config(&self) -> &InviteConfig {
        &self.invites
    }

    /// Validity window for newly issued invites
    pub fn invite_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.invites.ttl_days)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("identity", &"...")
            .field("invites", &self.invites)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    club_repo: Option<Arc<dyn ClubRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    invite_repo: Option<Arc<dyn InviteRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    email_queue: Option<Arc<dyn EmailQueueRepository>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    invites: Option<InviteConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn club_repo(mut self, repo: Arc<dyn ClubRepository>) -> Self {
        self.club_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn invite_repo(mut self, repo: Arc<dyn InviteRepository>) -> Self {
        self.invite_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn email_queue(mut self, repo: Arc<dyn EmailQueueRepository>) -> Self {
        self.email_queue = Some(repo);
        self
    }

    pub fn identity(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(provider);
        self
    }

    pub fn invite_config(mut self, config: InviteConfig) -> Self {
        self.invites = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// Invite settings fall back to their defaults when not supplied.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.club_repo.ok_or_else(|| ServiceError::validation("club_repo is required"))?,
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.member_repo.ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.invite_repo.ok_or_else(|| ServiceError::validation("invite_repo is required"))?,
            self.role_repo.ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            self.email_queue.ok_or_else(|| ServiceError::validation("email_queue is required"))?,
            self.identity.ok_or_else(|| ServiceError::validation("identity is required"))?,
            self.invites.unwrap_or_default(),
        ))
    }
}
