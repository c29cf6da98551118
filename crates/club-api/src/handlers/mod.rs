//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod clubs;
pub mod health;
pub mod invites;
pub mod members;
pub mod signup;

use club_core::ClubId;

use crate::response::ApiError;

/// Parse a club id path segment
pub(crate) fn parse_club_id(raw: &str) -> Result<ClubId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid club id format"))
}
