//! PostgreSQL implementation of RoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::traits::{RepoResult, RoleRepository};
use club_core::{Role, UserRole};

use crate::models::RoleModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserRole) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            r"
            SELECT id, name, description, permissions, is_active
            FROM roles
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Role::try_from).transpose()
    }
}
