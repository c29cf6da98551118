//! Invite service
//!
//! Handles issuing invites, bulk invites and consuming them. Issuing an
//! invite can touch the identity provider, the users table, the member and
//! invite tables and the outbound email; every completed step is recorded on
//! a [`Saga`] so a failure leaves nothing behind.

use chrono::Utc;
use club_core::{
    AccountMetadata, Club, ClubId, DomainError, Invite, InviteToken, Member, MemberId,
    MemberProfile, MemberType, QueuedEmail, SessionIdentity, User, UserId, UserRole,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::dto::{
    BulkInviteFailure, BulkInviteRequest, BulkInviteResponse, ConfirmInviteRequest,
    InviteMemberRequest, InviteeRequest, MemberResponse, OnboardingRequest,
};

use super::access::{AccessGate, ClubOperation};
use super::checks::checked_email;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::saga::Saga;

/// Outbox template queued after onboarding
pub const WELCOME_TEMPLATE: &str = "club-welcome";

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    /// Create a new InviteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Invite one person to a club
    #[instrument(skip(self, request), fields(club_id = ?request.club_id))]
    pub async fn invite_member(
        &self,
        actor_id: UserId,
        request: InviteMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let club_id = request.club_id.ok_or(DomainError::MissingField("club_id"))?;
        let club = self.authorize_invites(club_id, actor_id).await?;

        let member = self.invite_one(actor_id, &club, &request.invitee).await?;
        Ok(MemberResponse::from(member))
    }

    /// Remove invites that can no longer be accepted
    #[instrument(skip(self))]
    pub async fn purge_expired(&self) -> ServiceResult<u64> {
        let removed = self.ctx.invite_repo().delete_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Expired invites purged");
        }
        Ok(removed)
    }

    /// Invite several people; each invite succeeds or fails on its own
    #[instrument(skip(self, request), fields(club_id = ?request.club_id, count = request.members.len()))]
    pub async fn bulk_invite(
        &self,
        actor_id: UserId,
        request: BulkInviteRequest,
    ) -> ServiceResult<BulkInviteResponse> {
        let club_id = request.club_id.ok_or(DomainError::MissingField("club_id"))?;
        if request.members.is_empty() {
            return Err(ServiceError::validation(
                "Members array is required and must not be empty",
            ));
        }
        let club = self.authorize_invites(club_id, actor_id).await?;

        let mut response = BulkInviteResponse::default();
        for invitee in &request.members {
            match self.invite_one(actor_id, &club, invitee).await {
                Ok(member) => response.successful.push(MemberResponse::from(member)),
                Err(e) => {
                    warn!(email = %invitee.email, error = %e, "Bulk invite entry failed");
                    response.failed.push(BulkInviteFailure {
                        email: invitee.email.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            club_id = %club.id,
            successful = response.successful.len(),
            failed = response.failed.len(),
            "Bulk invite processed"
        );

        Ok(response)
    }

    /// Accept an invite as the authenticated caller
    #[instrument(skip(self, caller, request), fields(user_id = %caller.user_id))]
    pub async fn confirm_invite(
        &self,
        caller: &SessionIdentity,
        request: ConfirmInviteRequest,
    ) -> ServiceResult<MemberResponse> {
        if request.token.trim().is_empty() {
            return Err(DomainError::MissingField("token").into());
        }

        let (_, member) = self.accept(caller, &request.token, None).await?;
        Ok(MemberResponse::from(member))
    }

    /// Accept an invite and complete the member profile in the same update
    ///
    /// A welcome notification is queued afterwards; failing to queue it does
    /// not fail the call.
    #[instrument(skip(self, caller, request), fields(user_id = %caller.user_id))]
    pub async fn onboard_and_confirm(
        &self,
        caller: &SessionIdentity,
        request: OnboardingRequest,
    ) -> ServiceResult<MemberResponse> {
        if let Some(field) = request.missing_field() {
            return Err(DomainError::MissingField(field).into());
        }

        let profile = request.profile();
        let (invite, member) = self
            .accept(caller, &request.invite_token, Some(&profile))
            .await?;

        self.queue_welcome(&invite, &member).await;

        Ok(MemberResponse::from(member))
    }

    async fn authorize_invites(&self, club_id: ClubId, actor_id: UserId) -> ServiceResult<Club> {
        AccessGate::new(self.ctx)
            .authorize(club_id, actor_id, ClubOperation::InviteMembers)
            .await
    }

    /// Issue a single invite; everything created here is removed on failure
    #[instrument(skip(self, club, invitee), fields(club_id = %club.id))]
    async fn invite_one(
        &self,
        actor_id: UserId,
        club: &Club,
        invitee: &InviteeRequest,
    ) -> ServiceResult<Member> {
        if let Some(field) = invitee.missing_field() {
            return Err(DomainError::MissingField(field).into());
        }
        let email = checked_email(&invitee.email)?;
        let first_name = invitee.first_name.trim().to_string();
        let last_name = invitee.last_name.trim().to_string();

        if let Some(existing) = self
            .ctx
            .member_repo()
            .find_by_club_and_email(club.id, &email)
            .await?
        {
            return Err(DomainError::AlreadyMember(existing.membership_status).into());
        }

        let identity = self.ctx.identity();
        let users = self.ctx.user_repo();
        let members = self.ctx.member_repo();
        let invites = self.ctx.invite_repo();
        let mut saga = Saga::new("invite_member");

        let existing_account = identity.find_account_by_email(&email).await?;
        let is_new_account = existing_account.is_none();
        let account_id = match existing_account {
            Some(account) => account.id,
            None => {
                let metadata = AccountMetadata::new(&first_name, &last_name, UserRole::Member);
                let account = identity
                    .create_account(&email, &metadata, true)
                    .await
                    .map_err(DomainError::account_creation)?;
                let account_id = account.id;
                saga.push("delete provisional account", move || {
                    identity.delete_account(account_id)
                });

                let user = User::new(account_id, email.clone(), first_name.clone(), last_name.clone());
                saga.step(users.create(&user)).await?;
                saga.push("delete provisional user", move || users.delete(account_id));

                info!(user_id = %account_id, "Provisional account created");
                account_id
            }
        };

        let mut member = Member::pending(
            MemberId::generate(),
            club.id,
            first_name,
            last_name,
            invitee.member_type.unwrap_or(MemberType::Individual),
        );
        member.email = Some(email.clone());
        member.user_id = Some(account_id);
        saga.step(members.create(&member)).await?;
        let member_id = member.id;
        saga.push("delete member", move || members.delete(member_id));

        let invite = Invite::issue(member.id, club.id, actor_id, self.ctx.invite_ttl());
        saga.step(invites.create(&invite)).await?;
        let invite_id = invite.id;
        saga.push("delete invite", move || invites.delete(invite_id));

        let redirect_url = invite.join_url(&self.ctx.invite_config().frontend_url);
        let data = json!({
            "club_name": club.name,
            "first_name": member.first_name,
            "invite_token": invite.token,
        });
        if is_new_account {
            saga.step(identity.send_magic_link(&email, &redirect_url, &data))
                .await
                .map_err(DomainError::email_dispatch)?;
        } else {
            saga.step(identity.send_invite_email(&email, &redirect_url, &data))
                .await
                .map_err(DomainError::email_dispatch)?;
        }
        saga.commit();

        info!(
            member_id = %member.id,
            email = %email,
            new_account = is_new_account,
            "Member invited"
        );

        Ok(member)
    }

    /// Move the invited member to `active` for the caller
    ///
    /// The email guard is checked before expiry so a foreign caller is turned
    /// away the same way whether or not the token is still valid. The invite
    /// row is kept; a second acceptance stops at the status check.
    async fn accept(
        &self,
        caller: &SessionIdentity,
        raw_token: &str,
        profile: Option<&MemberProfile>,
    ) -> ServiceResult<(Invite, Member)> {
        let token = InviteToken::parse(raw_token.trim()).map_err(|_| DomainError::InviteNotFound)?;

        let invite = self
            .ctx
            .invite_repo()
            .find_by_token(token)
            .await?
            .ok_or(DomainError::InviteNotFound)?;

        let member = self
            .ctx
            .member_repo()
            .find_by_id(invite.member_id)
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        if !member.email_matches(&caller.email) {
            return Err(DomainError::EmailMismatch.into());
        }
        if invite.is_expired_at(Utc::now()) {
            return Err(DomainError::InviteExpired.into());
        }
        member.ensure_can_activate()?;

        let member = self
            .ctx
            .member_repo()
            .activate(member.id, caller.user_id, profile)
            .await?
            .ok_or(DomainError::AlreadyActive)?;

        info!(member_id = %member.id, club_id = %member.club_id, "Invite accepted");

        Ok((invite, member))
    }

    async fn queue_welcome(&self, invite: &Invite, member: &Member) {
        let Some(to) = member.email.clone() else {
            return;
        };

        let club_name = match self.ctx.club_repo().find_by_id(invite.club_id).await {
            Ok(club) => club.map(|c| c.name),
            Err(e) => {
                warn!(club_id = %invite.club_id, error = %e, "Club lookup for welcome email failed");
                None
            }
        };

        let email = QueuedEmail::new(
            to,
            WELCOME_TEMPLATE,
            json!({
                "first_name": member.first_name,
                "club_name": club_name,
            }),
        );

        if let Err(e) = self.ctx.email_queue().enqueue(&email).await {
            warn!(member_id = %member.id, error = %e, "Failed to queue welcome email");
        }
    }
}
