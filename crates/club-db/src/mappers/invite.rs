//! Invite model -> entity mapper

use club_core::{ClubId, Invite, InviteId, InviteToken, MemberId, UserId};

use crate::models::InviteModel;

impl From<InviteModel> for Invite {
    fn from(model: InviteModel) -> Self {
        Invite {
            id: InviteId::from_uuid(model.id),
            token: InviteToken::from_uuid(model.token),
            member_id: MemberId::from_uuid(model.member_id),
            club_id: ClubId::from_uuid(model.club_id),
            created_by: UserId::from_uuid(model.created_by),
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
