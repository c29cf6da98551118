//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use club_core::{ClubId, MemberId, MemberStatus, MemberType, UserId};
use serde::Serialize;

// ============================================================================
// Club Responses
// ============================================================================

/// Club as seen by a particular caller
#[derive(Debug, Clone, Serialize)]
pub struct ClubResponse {
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
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
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

/// One invite of a batch that did not go through
#[derive(Debug, Clone, Serialize)]
pub struct BulkInviteFailure {
    pub email: String,
    pub error: String,
}

/// Outcome of a batch invite
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkInviteResponse {
    pub successful: Vec<MemberResponse>,
    pub failed: Vec<BulkInviteFailure>,
}

// ============================================================================
// Signup Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SignupUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub user: SignupUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
