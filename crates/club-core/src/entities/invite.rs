//! Invite entity - single-use, time-limited token for one pending member

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{ClubId, InviteId, InviteToken, MemberId, UserId};

/// Default validity window for a freshly issued invite
pub const INVITE_TTL_DAYS: i64 = 7;

/// Invite entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub id: InviteId,
    pub token: InviteToken,
    pub member_id: MemberId,
    pub club_id: ClubId,
    pub created_by: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Issue a new invite with a fresh token, expiring `ttl` from now
    pub fn issue(member_id: MemberId, club_id: ClubId, created_by: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: InviteId::generate(),
            token: InviteToken::generate(),
            member_id,
            club_id,
            created_by,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Expired once `now` reaches `expires_at`; equality counts as expired
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Join link embedding the token
    pub fn join_url(&self, frontend_url: &str) -> String {
        format!("{}/join/{}", frontend_url.trim_end_matches('/'), self.token)
    }
}
