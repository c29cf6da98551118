//! Database models - SQLx-compatible structs for PostgreSQL tables

mod club;
mod invite;
mod member;
mod role;
mod user;

pub use club::ClubModel;
pub use invite::InviteModel;
pub use member::MemberModel;
pub use role::RoleModel;
pub use user::UserModel;
