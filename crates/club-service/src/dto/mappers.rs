//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use club_core::{Club, Member, User, UserId};

use super::responses::{ClubResponse, MemberResponse, SignupUser};

// ============================================================================
// Club Mappers
// ============================================================================

/// A club paired with the caller it is rendered for
#[derive(Debug, Clone, Copy)]
pub struct ClubForViewer<'a> {
    pub club: &'a Club,
    pub viewer: UserId,
}

impl From<ClubForViewer<'_>> for ClubResponse {
    fn from(view: ClubForViewer<'_>) -> Self {
        let club = view.club;
        Self {
            id: club.id,
            name: club.name.clone(),
            subdomain: club.subdomain.clone(),
            description: club.description.clone(),
            logo_url: club.logo_url.clone(),
            contact_email: club.contact_email.clone(),
            contact_phone: club.contact_phone.clone(),
            address: club.address.clone(),
            city: club.city.clone(),
            state: club.state.clone(),
            zip_code: club.zip_code.clone(),
            season_start: club.season_start,
            season_end: club.season_end,
            onboarding_completed: club.onboarding_completed,
            owner_id: club.owner_id,
            is_owner: club.is_owner(view.viewer),
            created_at: club.created_at,
            updated_at: club.updated_at,
        }
    }
}

impl ClubResponse {
    pub fn for_viewer(club: &Club, viewer: UserId) -> Self {
        Self::from(ClubForViewer { club, viewer })
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            club_id: member.club_id,
            user_id: member.user_id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            date_of_birth: member.date_of_birth,
            member_type: member.member_type,
            parent_member_id: member.parent_member_id,
            emergency_contact_name: member.emergency_contact_name.clone(),
            emergency_contact_phone: member.emergency_contact_phone.clone(),
            membership_status: member.membership_status,
            membership_start_date: member.membership_start_date,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for SignupUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.full_name(),
        }
    }
}
