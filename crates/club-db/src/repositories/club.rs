//! PostgreSQL implementation of ClubRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::traits::{ClubRepository, RepoResult};
use club_core::{Club, ClubId, DomainError, UserId};

use crate::models::ClubModel;

use super::error::{ensure_affected, map_db_error, map_unique_violation};

const CLUB_COLUMNS: &str = "c.id, c.name, c.subdomain, c.description, c.logo_url, \
    c.contact_email, c.contact_phone, c.address, c.city, c.state, c.zip_code, \
    c.season_start, c.season_end, c.onboarding_completed, c.owner_id, c.created_at, c.updated_at";

/// PostgreSQL implementation of ClubRepository
#[derive(Clone)]
pub struct PgClubRepository {
    pool: PgPool,
}

impl PgClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn club_not_found(id: ClubId) -> DomainError {
    DomainError::ClubNotFound(id.to_string())
}

#[async_trait]
impl ClubRepository for PgClubRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ClubId) -> RepoResult<Option<Club>> {
        let result = sqlx::query_as::<_, ClubModel>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs c WHERE c.id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Club::from))
    }

    #[instrument(skip(self))]
    async fn find_by_subdomain(&self, subdomain: &str) -> RepoResult<Option<Club>> {
        let result = sqlx::query_as::<_, ClubModel>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs c WHERE lower(c.subdomain) = lower($1)"
        ))
        .bind(subdomain)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Club::from))
    }

    #[instrument(skip(self))]
    async fn subdomain_exists(&self, subdomain: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM clubs WHERE lower(subdomain) = lower($1))
            ",
        )
        .bind(subdomain)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_member_user(&self, user_id: UserId) -> RepoResult<Vec<Club>> {
        let results = sqlx::query_as::<_, ClubModel>(&format!(
            r"
            SELECT DISTINCT {CLUB_COLUMNS}
            FROM clubs c
            JOIN members m ON m.club_id = c.id
            WHERE m.user_id = $1
            ORDER BY c.name
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Club::from).collect())
    }

    #[instrument(skip(self, club), fields(club_id = %club.id, subdomain = %club.subdomain))]
    async fn create(&self, club: &Club) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO clubs (
                id, name, subdomain, description, logo_url, contact_email, contact_phone,
                address, city, state, zip_code, season_start, season_end,
                onboarding_completed, owner_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(club.id.into_inner())
        .bind(&club.name)
        .bind(&club.subdomain)
        .bind(&club.description)
        .bind(&club.logo_url)
        .bind(&club.contact_email)
        .bind(&club.contact_phone)
        .bind(&club.address)
        .bind(&club.city)
        .bind(&club.state)
        .bind(&club.zip_code)
        .bind(club.season_start)
        .bind(club.season_end)
        .bind(club.onboarding_completed)
        .bind(club.owner_id.into_inner())
        .bind(club.created_at)
        .bind(club.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SubdomainTaken))?;

        Ok(())
    }

    #[instrument(skip(self, club), fields(club_id = %club.id))]
    async fn update(&self, club: &Club) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE clubs
            SET name = $2, subdomain = $3, description = $4, logo_url = $5,
                contact_email = $6, contact_phone = $7, address = $8, city = $9,
                state = $10, zip_code = $11, season_start = $12, season_end = $13,
                onboarding_completed = $14, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(club.id.into_inner())
        .bind(&club.name)
        .bind(&club.subdomain)
        .bind(&club.description)
        .bind(&club.logo_url)
        .bind(&club.contact_email)
        .bind(&club.contact_phone)
        .bind(&club.address)
        .bind(&club.city)
        .bind(&club.state)
        .bind(&club.zip_code)
        .bind(club.season_start)
        .bind(club.season_end)
        .bind(club.onboarding_completed)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SubdomainTaken))?;

        ensure_affected(result.rows_affected(), || club_not_found(club.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ClubId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || club_not_found(id))
    }
}
