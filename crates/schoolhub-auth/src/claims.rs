//! Token claims and admin roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What an admin account may do.
///
/// Editors manage content panels; super admins additionally manage site
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Editor,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Editor => "editor",
        }
    }

    pub fn can_manage_settings(&self) -> bool {
        matches!(self, AdminRole::SuperAdmin)
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "editor" => Ok(AdminRole::Editor),
            other => Err(format!("Unknown admin role: {}", other)),
        }
    }
}

impl TryFrom<String> for AdminRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Claims of an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Admin account id
    pub sub: String,
    pub email: String,
    pub role: AdminRole,
    /// Expiry (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [AdminRole::SuperAdmin, AdminRole::Editor] {
            assert_eq!(role.as_str().parse::<AdminRole>().unwrap(), role);
        }
        assert!("owner".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_only_super_admin_manages_settings() {
        assert!(AdminRole::SuperAdmin.can_manage_settings());
        assert!(!AdminRole::Editor.can_manage_settings());
    }

    #[test]
    fn test_claims_serialize_role_as_snake_case() {
        let claims = Claims {
            sub: "id-1".to_string(),
            email: "admin@school.ac.th".to_string(),
            role: AdminRole::SuperAdmin,
            exp: 10,
            iat: 1,
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains(r#""role":"super_admin""#));

        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, AdminRole::SuperAdmin);
    }
}
