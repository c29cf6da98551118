//! Member entity - a person's membership in one club
//!
//! Distinct from [`User`](super::User): a dependent may hold a membership
//! without a login, so `user_id` is optional until the invitee claims it.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DomainError;
use crate::value_objects::{ClubId, MemberId, MemberStatus, MemberType, UserId};

/// Club membership record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub club_id: ClubId,
    pub user_id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub member_type: MemberType,
    pub parent_member_id: Option<MemberId>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub membership_status: MemberStatus,
    pub membership_start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields captured during onboarding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

impl Member {
    /// Create a `pending` membership awaiting confirmation
    pub fn pending(
        id: MemberId,
        club_id: ClubId,
        first_name: String,
        last_name: String,
        member_type: MemberType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            club_id,
            user_id: None,
            first_name,
            last_name,
            email: None,
            phone: None,
            date_of_birth: None,
            member_type,
            parent_member_id: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            membership_status: MemberStatus::Pending,
            membership_start_date: now.date_naive(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the club owner's own membership, active from the start
    pub fn owner(
        id: MemberId,
        club_id: ClubId,
        owner_id: UserId,
        first_name: String,
        last_name: String,
        email: String,
    ) -> Self {
        let mut member = Self::pending(id, club_id, first_name, last_name, MemberType::Individual);
        member.user_id = Some(owner_id);
        member.email = Some(email);
        member.membership_status = MemberStatus::Active;
        member
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.membership_status.is_active()
    }

    /// Whether this record makes `user_id` an active member of its club
    #[inline]
    pub fn is_active_for(&self, user_id: UserId) -> bool {
        self.is_active() && self.user_id == Some(user_id)
    }

    /// Case-insensitive comparison against the invited email
    pub fn email_matches(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(email.trim()))
    }

    /// Check that the member may be moved to `active`
    pub fn ensure_can_activate(&self) -> Result<(), DomainError> {
        match self.membership_status {
            MemberStatus::Active => Err(DomainError::AlreadyActive),
            status if status.can_activate() => Ok(()),
            status => Err(DomainError::InvalidStatusTransition {
                from: status,
                to: MemberStatus::Active,
            }),
        }
    }

    /// Overwrite the onboarding profile fields
    pub fn apply_profile(&mut self, profile: MemberProfile) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        if profile.phone.is_some() {
            self.phone = profile.phone;
        }
        if profile.emergency_contact_name.is_some() {
            self.emergency_contact_name = profile.emergency_contact_name;
        }
        if profile.emergency_contact_phone.is_some() {
            self.emergency_contact_phone = profile.emergency_contact_phone;
        }
        self.updated_at = Utc::now();
    }
}
