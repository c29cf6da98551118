//! Signup service
//!
//! Self-service registration, optionally founding a club in the same call.

use club_core::{
    AccountMetadata, Club, ClubId, DomainError, Member, MemberId, SignUpRequest, User, UserRole,
};
use tracing::{info, instrument};

use crate::dto::{ClubResponse, SignupRequest, SignupResponse, SignupUser};

use super::checks::{checked_email, non_blank, normalize_subdomain};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::saga::Saga;

/// Signup service
pub struct SignupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SignupService<'a> {
    /// Create a new SignupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register an account, its profile row and, when requested, a club
    #[instrument(skip(self, request))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<SignupResponse> {
        if let Some(field) = request.missing_field() {
            return Err(DomainError::MissingField(field).into());
        }
        let email = checked_email(&request.email)?;
        let data = &request.data;
        let first_name = data.first_name.trim().to_string();
        let last_name = data.last_name.trim().to_string();

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists(email).into());
        }

        let club_request = data
            .club()
            .map(|(name, subdomain)| (name.to_string(), normalize_subdomain(subdomain)));
        if let Some((_, subdomain)) = &club_request {
            if self.ctx.club_repo().subdomain_exists(subdomain).await? {
                return Err(DomainError::SubdomainTaken.into());
            }
        }

        let role = if club_request.is_some() {
            UserRole::Admin
        } else {
            UserRole::Member
        };

        let identity = self.ctx.identity();
        let users = self.ctx.user_repo();
        let clubs = self.ctx.club_repo();
        let members = self.ctx.member_repo();
        let mut saga = Saga::new("signup");

        let account = identity
            .sign_up(&SignUpRequest {
                email: email.clone(),
                password: request.password.clone(),
                metadata: AccountMetadata::new(&first_name, &last_name, role),
            })
            .await?;
        let user_id = account.id;
        saga.push("delete account", move || identity.delete_account(user_id));

        let mut user = User::new(user_id, email, first_name, last_name);
        user.phone = data.phone.as_deref().and_then(non_blank);
        user.role = role;
        saga.step(users.create(&user)).await?;
        saga.push("delete user", move || users.delete(user_id));

        let mut club_response = None;
        if let Some((name, subdomain)) = club_request {
            let club = Club::new(ClubId::generate(), name, subdomain, user_id);
            saga.step(clubs.create(&club)).await?;
            let club_id = club.id;
            saga.push("delete club", move || clubs.delete(club_id));

            let mut member = Member::owner(
                MemberId::generate(),
                club.id,
                user_id,
                user.first_name.clone(),
                user.last_name.clone(),
                user.email.clone(),
            );
            member.phone.clone_from(&user.phone);
            member.date_of_birth = data.birth_date;
            saga.step(members.create(&member)).await?;
            let member_id = member.id;
            saga.push("delete owner member", move || members.delete(member_id));

            user.promote_to_admin(club.id);
            saga.step(users.update(&user)).await?;

            info!(club_id = %club.id, subdomain = %club.subdomain, "Club created at signup");
            club_response = Some(ClubResponse::for_viewer(&club, user_id));
        }
        saga.commit();

        info!(user_id = %user_id, role = %role, "User signed up");

        Ok(SignupResponse {
            user: SignupUser::from(&user),
            club: club_response,
        })
    }
}
