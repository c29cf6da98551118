//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in club-core.

mod club;
mod email;
mod error;
mod invite;
mod member;
mod role;
mod user;

pub use club::PgClubRepository;
pub use email::PgEmailQueueRepository;
pub use invite::PgInviteRepository;
pub use member::PgMemberRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
