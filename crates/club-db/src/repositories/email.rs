//! PostgreSQL outbox for notification emails

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use club_core::traits::{EmailQueueRepository, RepoResult};
use club_core::QueuedEmail;

use super::error::map_db_error;

/// Appends rows to the `emails` outbox table
#[derive(Clone)]
pub struct PgEmailQueueRepository {
    pool: PgPool,
}

impl PgEmailQueueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailQueueRepository for PgEmailQueueRepository {
    #[instrument(skip(self, email), fields(template = %email.template))]
    async fn enqueue(&self, email: &QueuedEmail) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO emails (to_email, template, data, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&email.to)
        .bind(&email.template)
        .bind(Json(&email.data))
        .bind(email.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
