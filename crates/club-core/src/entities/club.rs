//! Club entity - a tenant organization using the platform

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{ClubId, UserId};

/// Club (tenant) entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub subdomain: String,
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
    pub onboarding_completed: bool,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of the mutable club fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClubUpdate {
    pub name: Option<String>,
    pub subdomain: Option<String>,
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

impl ClubUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Club {
    /// Create a new Club; onboarding starts incomplete
    pub fn new(id: ClubId, name: String, subdomain: String, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            subdomain,
            description: None,
            logo_url: None,
            contact_email: None,
            contact_phone: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            season_start: None,
            season_end: None,
            onboarding_completed: false,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the club owner
    #[inline]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Apply a partial update. Ownership is not part of the update set.
    pub fn apply(&mut self, update: ClubUpdate) {
        let ClubUpdate {
            name,
            subdomain,
            description,
            logo_url,
            contact_email,
            contact_phone,
            address,
            city,
            state,
            zip_code,
            season_start,
            season_end,
            onboarding_completed,
        } = update;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = subdomain {
            self.subdomain = v;
        }
        if description.is_some() {
            self.description = description;
        }
        if logo_url.is_some() {
            self.logo_url = logo_url;
        }
        if contact_email.is_some() {
            self.contact_email = contact_email;
        }
        if contact_phone.is_some() {
            self.contact_phone = contact_phone;
        }
        if address.is_some() {
            self.address = address;
        }
        if city.is_some() {
            self.city = city;
        }
        if state.is_some() {
            self.state = state;
        }
        if zip_code.is_some() {
            self.zip_code = zip_code;
        }
        if season_start.is_some() {
            self.season_start = season_start;
        }
        if season_end.is_some() {
            self.season_end = season_end;
        }
        if let Some(v) = onboarding_completed {
            self.onboarding_completed = v;
        }
        self.updated_at = Utc::now();
    }
}
