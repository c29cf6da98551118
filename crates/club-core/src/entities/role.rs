//! Role entity - named permission bundle assigned to users

use crate::value_objects::UserRole;

/// Role row; keyed by the role name it represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: UserRole,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub is_active: bool,
}
