//! Membership status, member type and user role enumerations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership status of a Member row
///
/// ```text
/// pending ──confirm──▶ active
///    │                   │
///    ▼                   ▼
/// cancelled       inactive / suspended
/// ```
///
/// No transition returns an `active` member to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Pending,
    Active,
    Inactive,
    Suspended,
    Cancelled,
}

impl MemberStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
            Self::Cancelled => "cancelled",
        }
    }

    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether an invite confirmation may move this status to `active`
    #[inline]
    pub const fn can_activate(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Kind of membership held by a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    #[default]
    Individual,
    FamilyPrimary,
    FamilyDependent,
}

impl MemberType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::FamilyPrimary => "family_primary",
            Self::FamilyDependent => "family_dependent",
        }
    }

    /// Adult member types eligible to own a club
    #[inline]
    pub const fn is_adult(self) -> bool {
        !matches!(self, Self::FamilyDependent)
    }
}

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Member,
    ReadOnly,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
            Self::ReadOnly => "read_only",
        }
    }

    #[inline]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Error returned when a stored enumeration value is unknown
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! impl_str_enum {
    ($ty:ty, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == <$ty>::$variant.as_str() {
                        return Ok(<$ty>::$variant);
                    }
                )+
                Err(UnknownVariant {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

impl_str_enum!(MemberStatus, "member status", [Pending, Active, Inactive, Suspended, Cancelled]);
impl_str_enum!(MemberType, "member type", [Individual, FamilyPrimary, FamilyDependent]);
impl_str_enum!(UserRole, "user role", [Admin, Member, ReadOnly]);
