//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. No multi-statement atomicity is promised
//! across calls; callers order and compensate their own steps.
//!
//! Unique constraints are authoritative: `create` reports a violated
//! constraint as the matching conflict [`DomainError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Club, Invite, Member, MemberProfile, QueuedEmail, Role, User};
use crate::error::DomainError;
use crate::value_objects::{ClubId, InviteId, InviteToken, MemberId, UserId, UserRole};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Club Repository
// ============================================================================

#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Find club by ID
    async fn find_by_id(&self, id: ClubId) -> RepoResult<Option<Club>>;

    /// Find club by its unique subdomain
    async fn find_by_subdomain(&self, subdomain: &str) -> RepoResult<Option<Club>>;

    /// Check if a subdomain is already taken
    async fn subdomain_exists(&self, subdomain: &str) -> RepoResult<bool>;

    /// List clubs in which the user holds a membership of any status
    async fn find_by_member_user(&self, user_id: UserId) -> RepoResult<Vec<Club>>;

    /// Create a new club (`SubdomainTaken` on constraint violation)
    async fn create(&self, club: &Club) -> RepoResult<()>;

    /// Update an existing club
    async fn update(&self, club: &Club) -> RepoResult<()>;

    /// Hard delete a club
    async fn delete(&self, id: ClubId) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user profile row
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Hard delete a user profile row
    async fn delete(&self, id: UserId) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;

    /// Find the membership of an email address in a club (case-insensitive)
    async fn find_by_club_and_email(&self, club_id: ClubId, email: &str)
        -> RepoResult<Option<Member>>;

    /// Find the membership linked to a user in a club
    async fn find_by_club_and_user(&self, club_id: ClubId, user_id: UserId)
        -> RepoResult<Option<Member>>;

    /// List all members of a club ordered by last name, then first name
    async fn find_by_club(&self, club_id: ClubId) -> RepoResult<Vec<Member>>;

    /// Create a new member (`AlreadyMember` on constraint violation)
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Atomically move a `pending` member to `active`, attach `user_id` and
    /// optionally write onboarding profile fields, as one statement.
    ///
    /// Returns `None` when the member was not `pending` at the moment of the
    /// update, in which case nothing was written.
    async fn activate(
        &self,
        id: MemberId,
        user_id: UserId,
        profile: Option<&MemberProfile>,
    ) -> RepoResult<Option<Member>>;

    /// Hard delete a member
    async fn delete(&self, id: MemberId) -> RepoResult<()>;
}

// ============================================================================
// Invite Repository
// ============================================================================

#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Find invite by token
    async fn find_by_token(&self, token: InviteToken) -> RepoResult<Option<Invite>>;

    /// Create a new invite
    async fn create(&self, invite: &Invite) -> RepoResult<()>;

    /// Delete an invite
    async fn delete(&self, id: InviteId) -> RepoResult<()>;

    /// Delete every invite whose `expires_at` is at or before `now`
    ///
    /// Returns the number of rows removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find role by ID
    async fn find_by_id(&self, id: UserRole) -> RepoResult<Option<Role>>;
}

// ============================================================================
// Email Queue Repository
// ============================================================================

#[async_trait]
pub trait EmailQueueRepository: Send + Sync {
    /// Append a notification to the outbox
    async fn enqueue(&self, email: &QueuedEmail) -> RepoResult<()>;
}
