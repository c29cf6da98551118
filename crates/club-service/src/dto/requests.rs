//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Required text fields default to empty so that an absent field is reported
//! by name rather than as a JSON decoding failure.

use chrono::NaiveDate;
use club_core::{ClubId, ClubUpdate, MemberProfile, MemberType};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// First required field that is absent or blank
fn first_missing(fields: &[(&'static str, &str)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
}

// ============================================================================
// Club Requests
// ============================================================================

/// Create club request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateClubRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Club name must be at most 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 63, message = "Subdomain must be at most 63 characters"))]
    pub subdomain: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,

    #[serde(default)]
    pub contact_email: String,

    #[serde(default)]
    pub contact_phone: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub zip_code: String,

    pub logo_url: Option<String>,
    pub season_start: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
}

impl CreateClubRequest {
    pub fn missing_field(&self) -> Option<&'static str> {
        first_missing(&[
            ("name", self.name.as_str()),
            ("subdomain", self.subdomain.as_str()),
            ("description", self.description.as_str()),
            ("contact_email", self.contact_email.as_str()),
            ("contact_phone", self.contact_phone.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zip_code", self.zip_code.as_str()),
        ])
    }
}

/// Update club request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 100, message = "Club name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 63, message = "Subdomain must be 1-63 characters"))]
    pub subdomain: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub logo_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub season_start: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
    pub onboarding_completed: Option<bool>,
}

impl From<UpdateClubRequest> for ClubUpdate {
    fn from(req: UpdateClubRequest) -> Self {
        Self {
            name: req.name,
            subdomain: req.subdomain,
            description: req.description,
            logo_url: req.logo_url,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            address: req.address,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            season_start: req.season_start,
            season_end: req.season_end,
            onboarding_completed: req.onboarding_completed,
        }
    }
}

// ============================================================================
// Invite Requests
// ============================================================================

/// One person to invite
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InviteeRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,

    /// Defaults to `individual`
    pub member_type: Option<MemberType>,
}

impl InviteeRequest {
    pub fn missing_field(&self) -> Option<&'static str> {
        first_missing(&[
            ("email", self.email.as_str()),
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
        ])
    }
}

/// Invite a single member
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InviteMemberRequest {
    pub club_id: Option<ClubId>,

    #[serde(flatten)]
    #[validate(nested)]
    pub invitee: InviteeRequest,
}

/// Invite several members; each is processed on its own
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BulkInviteRequest {
    pub club_id: Option<ClubId>,

    #[serde(default)]
    #[validate(length(max = 500, message = "At most 500 members per request"))]
    pub members: Vec<InviteeRequest>,
}

/// Accept an invite
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ConfirmInviteRequest {
    #[serde(default)]
    pub token: String,
}

/// Accept an invite while completing the member profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OnboardingRequest {
    #[serde(default)]
    pub invite_token: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,

    pub phone: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

impl OnboardingRequest {
    pub fn missing_field(&self) -> Option<&'static str> {
        first_missing(&[
            ("invite_token", self.invite_token.as_str()),
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
        ])
    }

    pub fn profile(&self) -> MemberProfile {
        MemberProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.clone(),
            emergency_contact_name: self.emergency_contact_name.clone(),
            emergency_contact_phone: self.emergency_contact_phone.clone(),
        }
    }
}

// ============================================================================
// Member Requests
// ============================================================================

/// Self-service join; profile fields default to the caller's stored profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct JoinClubRequest {
    pub club_id: Option<ClubId>,

    pub member_type: Option<MemberType>,

    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    pub phone: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

// ============================================================================
// Signup Requests
// ============================================================================

/// Profile and optional club data supplied at signup
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupData {
    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Club name must be 1-100 characters"))]
    pub club_name: Option<String>,

    #[validate(length(min = 1, max = 63, message = "Subdomain must be 1-63 characters"))]
    pub club_subdomain: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

impl SignupData {
    /// Club name and subdomain, when both were supplied
    pub fn club(&self) -> Option<(&str, &str)> {
        match (self.club_name.as_deref(), self.club_subdomain.as_deref()) {
            (Some(name), Some(subdomain)) if !name.trim().is_empty() && !subdomain.trim().is_empty() => {
                Some((name.trim(), subdomain.trim()))
            }
            _ => None,
        }
    }
}

/// Self-service account registration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 72, message = "Password must be at most 72 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(nested)]
    pub data: SignupData,
}

impl SignupRequest {
    pub fn missing_field(&self) -> Option<&'static str> {
        first_missing(&[
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ])
    }
}
