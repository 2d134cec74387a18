//! Stash membership role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a user inside a stash.
///
/// Roles are ordered by privilege level: Owner > Admin > Member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    /// Created the stash; the only role that may delete it or change roles.
    Owner,
    /// May rename the stash, invite and remove members.
    Admin,
    /// May read and edit items and checklist entries.
    Member,
}

impl MemberRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Owner => 3,
            Self::Admin => 2,
            Self::Member => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &MemberRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Owner or admin.
    pub fn can_manage_members(&self) -> bool {
        self.has_at_least(&Self::Admin)
    }

    /// Whether a member holding this role may remove a member holding `target`.
    ///
    /// Owners remove anyone but themselves; admins remove plain members.
    pub fn can_remove(&self, target: &MemberRole) -> bool {
        match self {
            Self::Owner => *target != Self::Owner,
            Self::Admin => *target == Self::Member,
            Self::Member => false,
        }
    }

    /// Return the role as an upper-case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = prepper_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OWNER" => Ok(Self::Owner),
            "ADMIN" => Ok(Self::Admin),
            "MEMBER" => Ok(Self::Member),
            _ => Err(prepper_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: OWNER, ADMIN, MEMBER"
            ))),
        }
    }
}
