//! Role database model

use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for roles table
#[derive(Debug, Clone, FromRow)]
pub struct RoleModel {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Json<Vec<String>>,
    pub is_active: bool,
}
