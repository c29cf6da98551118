//! Ports - interfaces the domain needs from infrastructure

mod identity;
mod repositories;

pub use identity::{
    AccountMetadata, IdentityAccount, IdentityProvider, SessionIdentity, SignUpRequest,
};
pub use repositories::{
    ClubRepository, EmailQueueRepository, InviteRepository, MemberRepository, RepoResult,
    RoleRepository, UserRepository,
};
