//! # club-core
//!
//! Domain layer containing entities, value objects, repository traits and the
//! identity provider port. This crate has zero dependencies on infrastructure
//! (database, HTTP clients, web framework).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Club, ClubUpdate, Invite, Member, MemberProfile, QueuedEmail, Role, User, INVITE_TTL_DAYS,
};
pub use error::DomainError;
pub use traits::{
    AccountMetadata, ClubRepository, EmailQueueRepository, IdentityAccount, IdentityProvider,
    InviteRepository, MemberRepository, RepoResult, RoleRepository, SessionIdentity,
    SignUpRequest, UserRepository,
};
pub use value_objects::{
    is_valid_phone, normalize_email, ClubId, IdParseError, InviteId,
    InviteToken, MemberId, MemberStatus, MemberType, UnknownVariant, UserId, UserRole,
};
