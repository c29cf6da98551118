//! Member model -> entity mapper

use club_core::{ClubId, DomainError, Member, MemberId, UserId};

use super::parse_column;
use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        Ok(Member {
            id: MemberId::from_uuid(model.id),
            club_id: ClubId::from_uuid(model.club_id),
            user_id: model.user_id.map(UserId::from_uuid),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            date_of_birth: model.date_of_birth,
            member_type: parse_column("member_type", &model.member_type)?,
            parent_member_id: model.parent_member_id.map(MemberId::from_uuid),
            emergency_contact_name: model.emergency_contact_name,
            emergency_contact_phone: model.emergency_contact_phone,
            membership_status: parse_column("membership_status", &model.membership_status)?,
            membership_start_date: model.membership_start_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
