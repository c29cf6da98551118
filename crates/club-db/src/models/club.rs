//! Club database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for clubs table
#[derive(Debug, Clone, FromRow)]
pub struct ClubModel {
    pub id: Uuid,
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
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
