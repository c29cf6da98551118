//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use club_core::traits::{MemberRepository, RepoResult};
use club_core::{ClubId, DomainError, Member, MemberId, MemberProfile, MemberStatus, UserId};

use crate::mappers::try_collect;
use crate::models::MemberModel;

use super::error::{ensure_affected, is_unique_violation, map_db_error};

const MEMBER_COLUMNS: &str = "id, club_id, user_id, first_name, last_name, email, phone, \
    date_of_birth, member_type, parent_member_id, emergency_contact_name, \
    emergency_contact_phone, membership_status, membership_start_date, created_at, updated_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a unique violation on insert to the conflicting row's status
    async fn conflict_for(&self, member: &Member) -> DomainError {
        let existing = match (member.user_id, member.email.as_deref()) {
            (_, Some(email)) => self.find_by_club_and_email(member.club_id, email).await,
            (Some(user_id), None) => self.find_by_club_and_user(member.club_id, user_id).await,
            (None, None) => Ok(None),
        };

        match existing {
            Ok(Some(found)) => DomainError::AlreadyMember(found.membership_status),
            Ok(None) => DomainError::AlreadyMember(MemberStatus::Pending),
            Err(e) => {
                warn!(error = %e, "Failed to load conflicting member row");
                DomainError::AlreadyMember(MemberStatus::Pending)
            }
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_club_and_email(
        &self,
        club_id: ClubId,
        email: &str,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE club_id = $1 AND lower(email) = lower($2)"
        ))
        .bind(club_id.into_inner())
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_club_and_user(
        &self,
        club_id: ClubId,
        user_id: UserId,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE club_id = $1 AND user_id = $2"
        ))
        .bind(club_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_club(&self, club_id: ClubId) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE club_id = $1 ORDER BY last_name, first_name"
        ))
        .bind(club_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        try_collect(results)
    }

    #[instrument(skip(self, member), fields(member_id = %member.id, club_id = %member.club_id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            INSERT INTO members (
                id, club_id, user_id, first_name, last_name, email, phone, date_of_birth,
                member_type, parent_member_id, emergency_contact_name, emergency_contact_phone,
                membership_status, membership_start_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.club_id.into_inner())
        .bind(member.user_id.map(UserId::into_inner))
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.date_of_birth)
        .bind(member.member_type.as_str())
        .bind(member.parent_member_id.map(MemberId::into_inner))
        .bind(&member.emergency_contact_name)
        .bind(&member.emergency_contact_phone)
        .bind(member.membership_status.as_str())
        .bind(member.membership_start_date)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(self.conflict_for(member).await),
            Err(e) => Err(map_db_error(e)),
        }
    }

    #[instrument(skip(self, profile))]
    async fn activate(
        &self,
        id: MemberId,
        user_id: UserId,
        profile: Option<&MemberProfile>,
    ) -> RepoResult<Option<Member>> {
        // Guarded on the current status so two racing confirmations cannot both win
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            r"
            UPDATE members
            SET membership_status = 'active',
                user_id = $2,
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone = COALESCE($5, phone),
                emergency_contact_name = COALESCE($6, emergency_contact_name),
                emergency_contact_phone = COALESCE($7, emergency_contact_phone),
                updated_at = NOW()
            WHERE id = $1 AND membership_status = 'pending'
            RETURNING {MEMBER_COLUMNS}
            "
        ))
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .bind(profile.map(|p| p.first_name.as_str()))
        .bind(profile.map(|p| p.last_name.as_str()))
        .bind(profile.and_then(|p| p.phone.as_deref()))
        .bind(profile.and_then(|p| p.emergency_contact_name.as_deref()))
        .bind(profile.and_then(|p| p.emergency_contact_phone.as_deref()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                // user already holds another membership row in this club
                DomainError::AlreadyMember(MemberStatus::Active)
            } else {
                map_db_error(e)
            }
        })?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MemberId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::MemberNotFound)
    }
}
