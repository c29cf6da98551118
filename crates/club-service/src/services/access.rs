//! Access control gate
//!
//! Every club operation is looked up in a fixed policy table before any side
//! effect is attempted.

use club_common::InvitePolicy;
use club_core::{Club, ClubId, DomainError, UserId};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Operations gated per club
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubOperation {
    ReadClub,
    ListMembers,
    UpdateClub,
    /// Event create/update/delete. Events live outside this service; the row
    /// is kept so their mutations are gated by the same table.
    ManageEvents,
    /// Program create/update/delete, gated like events
    ManagePrograms,
    InviteMembers,
}

/// Minimum relationship the caller must have with the club
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredAccess {
    Owner,
    OwnerOrActiveMember,
}

impl ClubOperation {
    pub const ALL: [Self; 6] = [
        Self::ReadClub,
        Self::ListMembers,
        Self::UpdateClub,
        Self::ManageEvents,
        Self::ManagePrograms,
        Self::InviteMembers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadClub => "read_club",
            Self::ListMembers => "list_members",
            Self::UpdateClub => "update_club",
            Self::ManageEvents => "manage_events",
            Self::ManagePrograms => "manage_programs",
            Self::InviteMembers => "invite_members",
        }
    }

    pub fn required_access(self, invite_policy: InvitePolicy) -> RequiredAccess {
        match self {
            Self::ReadClub | Self::ListMembers => RequiredAccess::OwnerOrActiveMember,
            Self::UpdateClub | Self::ManageEvents | Self::ManagePrograms => RequiredAccess::Owner,
            Self::InviteMembers => match invite_policy {
                InvitePolicy::OwnerOnly => RequiredAccess::Owner,
                InvitePolicy::OwnerOrActiveMember => RequiredAccess::OwnerOrActiveMember,
            },
        }
    }
}

/// Decides whether a caller may act on a club
pub struct AccessGate<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessGate<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn is_owner(club: &Club, user_id: UserId) -> bool {
        club.is_owner(user_id)
    }

    /// Whether an `active` membership links `user_id` to the club
    #[instrument(skip(self, club), fields(club_id = %club.id))]
    pub async fn is_active_member(&self, club: &Club, user_id: UserId) -> ServiceResult<bool> {
        let member = self
            .ctx
            .member_repo()
            .find_by_club_and_user(club.id, user_id)
            .await?;
        Ok(member.is_some_and(|m| m.is_active_for(user_id)))
    }

    /// Fail with a forbidden error unless `user_id` may perform `operation`
    #[instrument(skip(self, club), fields(club_id = %club.id, operation = operation.as_str()))]
    pub async fn require(
        &self,
        club: &Club,
        user_id: UserId,
        operation: ClubOperation,
    ) -> ServiceResult<()> {
        if Self::is_owner(club, user_id) {
            return Ok(());
        }

        match operation.required_access(self.ctx.invite_config().policy) {
            RequiredAccess::Owner => {
                debug!(user_id = %user_id, "Rejected: owner required");
                Err(DomainError::NotClubOwner.into())
            }
            RequiredAccess::OwnerOrActiveMember => {
                if self.is_active_member(club, user_id).await? {
                    Ok(())
                } else {
                    debug!(user_id = %user_id, "Rejected: no active membership");
                    Err(DomainError::NoClubAccess(club.id).into())
                }
            }
        }
    }

    /// Load the club and check access in one go
    #[instrument(skip(self))]
    pub async fn authorize(
        &self,
        club_id: ClubId,
        user_id: UserId,
        operation: ClubOperation,
    ) -> ServiceResult<Club> {
        let club = self
            .ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ClubNotFound(club_id.to_string())))?;

        self.require(&club, user_id, operation).await?;
        Ok(club)
    }
}
