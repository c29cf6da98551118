//! Role model -> entity mapper

use club_core::{DomainError, Role};

use super::parse_column;
use crate::models::RoleModel;

impl TryFrom<RoleModel> for Role {
    type Error = DomainError;

    fn try_from(model: RoleModel) -> Result<Self, Self::Error> {
        Ok(Role {
            id: parse_column("roles.id", &model.id)?,
            name: model.name,
            description: model.description,
            permissions: model.permissions.0,
            is_active: model.is_active,
        })
    }
}
