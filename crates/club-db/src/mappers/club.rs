//! Club model -> entity mapper

use club_core::{Club, ClubId, UserId};

use crate::models::ClubModel;

impl From<ClubModel> for Club {
    fn from(model: ClubModel) -> Self {
        Club {
            id: ClubId::from_uuid(model.id),
            name: model.name,
            subdomain: model.subdomain,
            description: model.description,
            logo_url: model.logo_url,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            address: model.address,
            city: model.city,
            state: model.state,
            zip_code: model.zip_code,
            season_start: model.season_start,
            season_end: model.season_end,
            onboarding_completed: model.onboarding_completed,
            owner_id: UserId::from_uuid(model.owner_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
