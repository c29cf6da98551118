//! Domain entities - core business objects

mod club;
mod email;
mod invite;
mod member;
mod role;
mod user;

pub use club::{Club, ClubUpdate};
pub use email::QueuedEmail;
pub use invite::{Invite, INVITE_TTL_DAYS};
pub use member::{Member, MemberProfile};
pub use role::Role;
pub use user::User;
