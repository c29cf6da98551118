//! Identity provider port
//!
//! The identity provider owns accounts, passwords, outbound auth emails and
//! session tokens. The lifecycle core only sees this capability surface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::traits::RepoResult;
use crate::value_objects::{UserId, UserRole};

/// Account as known to the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAccount {
    pub id: UserId,
    pub email: String,
}

/// Caller resolved from a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub email: String,
}

/// Metadata stored on the identity account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetadata {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: UserRole,
}

impl AccountMetadata {
    pub fn new(first_name: &str, last_name: &str, role: UserRole) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            full_name: format!("{first_name} {last_name}").trim().to_string(),
            role,
        }
    }
}

/// Self-service password signup
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub metadata: AccountMetadata,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up an account by email (case-insensitive)
    async fn find_account_by_email(&self, email: &str) -> RepoResult<Option<IdentityAccount>>;

    /// Create an account without a usable password
    async fn create_account(
        &self,
        email: &str,
        metadata: &AccountMetadata,
        email_confirmed: bool,
    ) -> RepoResult<IdentityAccount>;

    /// Create an account with a password
    async fn sign_up(&self, request: &SignUpRequest) -> RepoResult<IdentityAccount>;

    /// Delete an account
    async fn delete_account(&self, id: UserId) -> RepoResult<()>;

    /// Email a one-time sign-in link redirecting to `redirect_url`
    async fn send_magic_link(
        &self,
        email: &str,
        redirect_url: &str,
        data: &serde_json::Value,
    ) -> RepoResult<()>;

    /// Email a standard invitation redirecting to `redirect_url`
    async fn send_invite_email(
        &self,
        email: &str,
        redirect_url: &str,
        data: &serde_json::Value,
    ) -> RepoResult<()>;

    /// Resolve a session token to the caller (`InvalidSession` when rejected)
    async fn authenticate(&self, session_token: &str) -> RepoResult<SessionIdentity>;
}
