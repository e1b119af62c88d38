//! Role carried by an authenticated session.

use serde::{Deserialize, Serialize};

/// Permission level of a signed-in user.
///
/// Only [`UserRole::Admin`] unlocks the admin area; the other roles exist so
/// that a session created for an editor can be told apart from an admin one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access to the admin area.
    #[default]
    Admin,
    /// Content editor without admin access.
    Editor,
}

impl UserRole {
    /// Returns whether this role grants admin access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Editor => write!(f, "editor"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_display() {
        for role in [UserRole::Admin, UserRole::Editor] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("super_admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Editor.is_admin());
    }
}
