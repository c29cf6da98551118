//! Value objects - immutable types that represent domain concepts

mod contact;
mod ids;
mod membership;

pub use contact::{is_valid_phone, normalize_email};
pub use ids::{ClubId, IdParseError, InviteId, InviteToken, MemberId, UserId};
pub use membership::{MemberStatus, MemberType, UnknownVariant, UserRole};
