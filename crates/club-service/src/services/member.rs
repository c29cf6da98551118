//! Member service
//!
//! Handles self-service joins and member listings.

use club_core::{ClubId, DomainError, Member, MemberId, MemberType, UserId};
use tracing::{info, instrument};

use crate::dto::{JoinClubRequest, MemberResponse};

use super::access::{AccessGate, ClubOperation};
use super::checks::non_blank;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Request membership without an invite
    ///
    /// The new `pending` member copies the caller's stored profile; request
    /// fields override it where given.
    #[instrument(skip(self, request), fields(club_id = ?request.club_id))]
    pub async fn join_club(
        &self,
        user_id: UserId,
        request: JoinClubRequest,
    ) -> ServiceResult<MemberResponse> {
        let club_id = request.club_id.ok_or(DomainError::MissingField("club_id"))?;

        let club = self
            .ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| DomainError::ClubNotFound(club_id.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let members = self.ctx.member_repo();
        if let Some(existing) = members.find_by_club_and_user(club.id, user_id).await? {
            return Err(DomainError::AlreadyMember(existing.membership_status).into());
        }
        if let Some(existing) = members.find_by_club_and_email(club.id, &user.email).await? {
            return Err(DomainError::AlreadyMember(existing.membership_status).into());
        }

        let first_name = request
            .first_name
            .as_deref()
            .and_then(non_blank)
            .unwrap_or(user.first_name);
        let last_name = request
            .last_name
            .as_deref()
            .and_then(non_blank)
            .unwrap_or(user.last_name);

        let mut member = Member::pending(
            MemberId::generate(),
            club.id,
            first_name,
            last_name,
            request.member_type.unwrap_or(MemberType::Individual),
        );
        member.user_id = Some(user_id);
        member.email = Some(user.email);
        member.phone = request.phone.as_deref().and_then(non_blank).or(user.phone);
        member.emergency_contact_name = request.emergency_contact_name.as_deref().and_then(non_blank);
        member.emergency_contact_phone = request.emergency_contact_phone.as_deref().and_then(non_blank);

        members.create(&member).await?;

        info!(member_id = %member.id, club_id = %club.id, user_id = %user_id, "Join requested");

        Ok(MemberResponse::from(member))
    }

    /// All members of a club, by last then first name
    #[instrument(skip(self))]
    pub async fn list_club_members(
        &self,
        user_id: UserId,
        club_id: ClubId,
    ) -> ServiceResult<Vec<MemberResponse>> {
        AccessGate::new(self.ctx)
            .authorize(club_id, user_id, ClubOperation::ListMembers)
            .await?;

        let members = self.ctx.member_repo().find_by_club(club_id).await?;
        Ok(members.iter().map(MemberResponse::from).collect())
    }
}
