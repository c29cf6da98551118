//! PostgreSQL implementation of InviteRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use club_core::traits::{InviteRepository, RepoResult};
use club_core::{DomainError, Invite, InviteId, InviteToken};

use crate::models::InviteModel;

use super::error::{ensure_affected, map_db_error};

/// PostgreSQL implementation of InviteRepository
#[derive(Clone)]
pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    #[instrument(skip(self, token))]
    async fn find_by_token(&self, token: InviteToken) -> RepoResult<Option<Invite>> {
        let result = sqlx::query_as::<_, InviteModel>(
            r"
            SELECT id, token, member_id, club_id, created_by, expires_at, created_at
            FROM invites
            WHERE token = $1
            ",
        )
        .bind(token.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invite::from))
    }

    #[instrument(skip(self, invite), fields(invite_id = %invite.id, member_id = %invite.member_id))]
    async fn create(&self, invite: &Invite) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO invites (id, token, member_id, club_id, created_by, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(invite.id.into_inner())
        .bind(invite.token.into_inner())
        .bind(invite.member_id.into_inner())
        .bind(invite.club_id.into_inner())
        .bind(invite.created_by.into_inner())
        .bind(invite.expires_at)
        .bind(invite.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: InviteId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM invites WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::InviteNotFound)
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM invites WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
