use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of roles. Ids match the seeded `roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    SuperAdmin = 1,
    Admin = 2,
    Staff = 3,
    #[default]
    User = 4,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Staff,
        UserRole::User,
    ];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            SuperAdmin => "super_admin",
            Admin => "admin",
            Staff => "staff",
            User => "user",
        }
    }

    /// Super admins pass every role gate
    #[inline]
    pub const fn implies_all_roles(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            1 => Some(SuperAdmin),
            2 => Some(Admin),
            3 => Some(Staff),
            4 => Some(User),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.code() == code)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown role {s:?}"))
    }
}
