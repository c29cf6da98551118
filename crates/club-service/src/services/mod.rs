//! Business logic services
//!
//! This module contains the membership lifecycle core: every multi-step
//! mutation across users, members, invites, clubs and the identity provider
//! runs here, guarded by the access gate and compensated by a saga.

pub mod access;
mod checks;
pub mod club;
pub mod context;
pub mod error;
pub mod invite;
pub mod member;
pub mod saga;
pub mod signup;

// Re-export all services for convenience
pub use access::{AccessGate, ClubOperation, RequiredAccess};
pub use club::ClubService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invite::{InviteService, WELCOME_TEMPLATE};
pub use member::MemberService;
pub use saga::Saga;
pub use signup::SignupService;
