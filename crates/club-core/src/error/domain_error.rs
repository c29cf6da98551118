//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ClubId, MemberStatus, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Club not found: {0}")]
    ClubNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Member not found")]
    MemberNotFound,

    #[error("Invalid or expired invite token")]
    InviteNotFound,

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone format. Use (XXX) XXX-XXXX")]
    InvalidPhone,

    // =========================================================================
    // Authentication / Authorization Errors
    // =========================================================================
    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("Only club owner can perform this action")]
    NotClubOwner,

    #[error("You do not have access to this club")]
    NoClubAccess(ClubId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Subdomain already taken")]
    SubdomainTaken,

    #[error("User with email {0} already exists")]
    EmailAlreadyExists(String),

    #[error("This email is already a {0} member of this club")]
    AlreadyMember(MemberStatus),

    #[error("Membership is already active")]
    AlreadyActive,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Invite has expired")]
    InviteExpired,

    #[error("Email mismatch. Please use the same email the invite was sent to.")]
    EmailMismatch,

    #[error("Cannot move membership from {from} to {to}")]
    InvalidStatusTransition {
        from: MemberStatus,
        to: MemberStatus,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Identity provider error: {0}")]
    IdentityError(String),

    #[error("Error creating account: {0}")]
    AccountCreation(String),

    #[error("Failed to send invite email: {0}")]
    EmailDispatch(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ClubNotFound(_) => "UNKNOWN_CLUB",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::InviteNotFound => "UNKNOWN_INVITE",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPhone => "INVALID_PHONE",

            // Authentication / Authorization
            Self::InvalidSession => "INVALID_SESSION",
            Self::NotClubOwner => "NOT_CLUB_OWNER",
            Self::NoClubAccess(_) => "NO_CLUB_ACCESS",

            // Conflict
            Self::SubdomainTaken => "SUBDOMAIN_TAKEN",
            Self::EmailAlreadyExists(_) => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyMember(_) => "ALREADY_MEMBER",
            Self::AlreadyActive => "ALREADY_ACTIVE",

            // Business Rules
            Self::InviteExpired => "INVITE_EXPIRED",
            Self::EmailMismatch => "EMAIL_MISMATCH",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::IdentityError(_) => "IDENTITY_PROVIDER_ERROR",
            Self::AccountCreation(_) => "ACCOUNT_CREATION_FAILED",
            Self::EmailDispatch(_) => "EMAIL_DISPATCH_FAILED",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Identity provider failure while provisioning an invitee's account
    ///
    /// A conflict reported by the provider keeps its own kind.
    pub fn account_creation(err: DomainError) -> Self {
        match err {
            Self::EmailAlreadyExists(_) => err,
            other => Self::AccountCreation(other.to_string()),
        }
    }

    /// Identity provider failure while sending the invite email
    pub fn email_dispatch(err: DomainError) -> Self {
        Self::EmailDispatch(err.to_string())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClubNotFound(_)
                | Self::UserNotFound(_)
                | Self::MemberNotFound
                | Self::InviteNotFound
                | Self::RoleNotFound(_)
        )
    }

    /// Check if this is a validation error
    ///
    /// Expired invites and email mismatches are rejected as bad requests too.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingField(_)
                | Self::InvalidEmail
                | Self::InvalidPhone
                | Self::InviteExpired
                | Self::EmailMismatch
        )
    }

    /// Check if the caller's session was rejected
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidSession)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotClubOwner | Self::NoClubAccess(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SubdomainTaken
                | Self::EmailAlreadyExists(_)
                | Self::AlreadyMember(_)
                | Self::AlreadyActive
                | Self::InvalidStatusTransition { .. }
        )
    }
}
