//! User entity - an authenticable account with profile fields

use chrono::{DateTime, Utc};

use crate::value_objects::{ClubId, UserId, UserRole};

/// User profile row; `id` is shared with the identity provider account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub club_id: Option<ClubId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active User with the `member` role
    pub fn new(id: UserId, email: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            first_name,
            last_name,
            phone: None,
            role: UserRole::Member,
            club_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Promote to club admin with the given primary club
    pub fn promote_to_admin(&mut self, club_id: ClubId) {
        self.role = UserRole::Admin;
        self.club_id = Some(club_id);
        self.updated_at = Utc::now();
    }
}
