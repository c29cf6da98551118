//! Club service
//!
//! Handles club creation, lookup and updates.

use club_core::{Club, ClubId, ClubUpdate, DomainError, Member, MemberId, UserId, UserRole};
use tracing::{info, instrument};

use crate::dto::{ClubResponse, CreateClubRequest, UpdateClubRequest};

use super::access::{AccessGate, ClubOperation};
use super::checks::{checked_email, checked_phone, non_blank, normalize_subdomain};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::saga::Saga;

/// Club service
pub struct ClubService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClubService<'a> {
    /// Create a new ClubService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a club owned by the caller
    ///
    /// Inserts the club, the owner's active membership and promotes the owner
    /// to admin. A failure after the club insert removes whatever was created.
    #[instrument(skip(self, request), fields(subdomain = %request.subdomain))]
    pub async fn create_club(
        &self,
        owner_id: UserId,
        request: CreateClubRequest,
    ) -> ServiceResult<ClubResponse> {
        if let Some(field) = request.missing_field() {
            return Err(DomainError::MissingField(field).into());
        }
        let contact_email = checked_email(&request.contact_email)?;
        let contact_phone = checked_phone(&request.contact_phone)?;
        let subdomain = normalize_subdomain(&request.subdomain);

        let mut owner = self
            .ctx
            .user_repo()
            .find_by_id(owner_id)
            .await?
            .ok_or(DomainError::UserNotFound(owner_id))?;

        if self.ctx.club_repo().subdomain_exists(&subdomain).await? {
            return Err(DomainError::SubdomainTaken.into());
        }

        self.ctx
            .role_repo()
            .find_by_id(UserRole::Admin)
            .await?
            .filter(|role| role.is_active)
            .ok_or_else(|| DomainError::RoleNotFound(UserRole::Admin.to_string()))?;

        let mut club = Club::new(
            ClubId::generate(),
            request.name.trim().to_string(),
            subdomain,
            owner_id,
        );
        club.description = non_blank(&request.description);
        club.logo_url = request.logo_url.as_deref().and_then(non_blank);
        club.contact_email = Some(contact_email);
        club.contact_phone = Some(contact_phone);
        club.address = non_blank(&request.address);
        club.city = non_blank(&request.city);
        club.state = non_blank(&request.state);
        club.zip_code = non_blank(&request.zip_code);
        club.season_start = request.season_start;
        club.season_end = request.season_end;

        let clubs = self.ctx.club_repo();
        let members = self.ctx.member_repo();
        let mut saga = Saga::new("create_club");

        clubs.create(&club).await?;
        let club_id = club.id;
        saga.push("delete club", move || clubs.delete(club_id));

        let member = Member::owner(
            MemberId::generate(),
            club.id,
            owner_id,
            owner.first_name.clone(),
            owner.last_name.clone(),
            owner.email.clone(),
        );
        saga.step(members.create(&member)).await?;
        let member_id = member.id;
        saga.push("delete owner member", move || members.delete(member_id));

        owner.promote_to_admin(club.id);
        saga.step(self.ctx.user_repo().update(&owner)).await?;
        saga.commit();

        info!(club_id = %club.id, owner_id = %owner_id, "Club created");

        Ok(ClubResponse::for_viewer(&club, owner_id))
    }

    /// Every club in which the caller holds a membership of any status
    #[instrument(skip(self))]
    pub async fn list_my_clubs(&self, user_id: UserId) -> ServiceResult<Vec<ClubResponse>> {
        let clubs = self.ctx.club_repo().find_by_member_user(user_id).await?;
        Ok(clubs
            .iter()
            .map(|club| ClubResponse::for_viewer(club, user_id))
            .collect())
    }

    /// Club by subdomain, visible to its owner and active members
    #[instrument(skip(self))]
    pub async fn get_club_by_subdomain(
        &self,
        user_id: UserId,
        subdomain: &str,
    ) -> ServiceResult<ClubResponse> {
        let subdomain = normalize_subdomain(subdomain);
        let club = self
            .ctx
            .club_repo()
            .find_by_subdomain(&subdomain)
            .await?
            .ok_or(DomainError::ClubNotFound(subdomain))?;

        AccessGate::new(self.ctx)
            .require(&club, user_id, ClubOperation::ReadClub)
            .await?;

        Ok(ClubResponse::for_viewer(&club, user_id))
    }

    /// Apply a partial update; owner only
    #[instrument(skip(self, request))]
    pub async fn update_club(
        &self,
        user_id: UserId,
        club_id: ClubId,
        request: UpdateClubRequest,
    ) -> ServiceResult<ClubResponse> {
        let mut club = AccessGate::new(self.ctx)
            .authorize(club_id, user_id, ClubOperation::UpdateClub)
            .await?;

        let mut update = ClubUpdate::from(request);
        if update.is_empty() {
            return Ok(ClubResponse::for_viewer(&club, user_id));
        }

        if let Some(email) = update.contact_email.as_deref() {
            update.contact_email = Some(checked_email(email)?);
        }
        if let Some(phone) = update.contact_phone.as_deref() {
            update.contact_phone = Some(checked_phone(phone)?);
        }
        if let Some(subdomain) = update.subdomain.as_deref() {
            let subdomain = normalize_subdomain(subdomain);
            if subdomain != club.subdomain
                && self.ctx.club_repo().subdomain_exists(&subdomain).await?
            {
                return Err(DomainError::SubdomainTaken.into());
            }
            update.subdomain = Some(subdomain);
        }

        club.apply(update);
        self.ctx.club_repo().update(&club).await?;

        info!(club_id = %club.id, "Club updated");

        Ok(ClubResponse::for_viewer(&club, user_id))
    }
}
