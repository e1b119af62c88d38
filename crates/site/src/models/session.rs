//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use assistra_core::{Email, UserRole};

use super::admin_user::AdminUser;

/// Session-stored identity.
///
/// Written once at login and only read afterwards. Serialized in camel case
/// because the same shape is returned by `GET /api/auth/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub is_admin: bool,
}

impl From<&AdminUser> for SessionUser {
    fn from(user: &AdminUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_admin: user.role.is_admin(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_user_json_shape() {
        let admin = AdminUser {
            name: "Marina Alves".to_string(),
            email: Email::parse("marina@assistra.com.br").unwrap(),
            username: "marina".to_string(),
            role: UserRole::Admin,
        };

        let json = serde_json::to_value(SessionUser::from(&admin)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Marina Alves",
                "email": "marina@assistra.com.br",
                "role": "admin",
                "isAdmin": true,
            })
        );
    }

    #[test]
    fn test_editor_is_not_admin() {
        let editor = AdminUser {
            name: "Caio".to_string(),
            email: Email::parse("caio@assistra.com.br").unwrap(),
            username: "caio".to_string(),
            role: UserRole::Editor,
        };
        assert!(!SessionUser::from(&editor).is_admin);
    }
}
