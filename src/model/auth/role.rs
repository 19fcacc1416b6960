use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Staff/voter roles, totally ordered: a higher role satisfies any
/// lower-role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Member,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Numeric hierarchy level; higher means more permissions.
    pub fn level(self) -> u8 {
        match self {
            Self::Member => 1,
            Self::Admin => 2,
            Self::SuperAdmin => 3,
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Member => "member",
                Self::Admin => "admin",
                Self::SuperAdmin => "super admin",
            }
        )
    }
}

/// Does the (possibly absent) user role satisfy the required role?
/// No role means no permissions at all.
pub fn has_permission(user_role: Option<Role>, required: Role) -> bool {
    match user_role {
        Some(role) => role.level() >= required.level(),
        None => false,
    }
}
