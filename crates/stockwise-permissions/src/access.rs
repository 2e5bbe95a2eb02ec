//! The permission-relevant view of a user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::PermissionStore;

/// Role of a back-office user. `Admin` bypasses every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    Manager,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
        }
    }

    /// Lenient parse for persisted role strings. Anything that is not
    /// recognisably `admin` is a `Manager`, so a corrupt role never elevates.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or(Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// What the evaluation engine needs to know about a user.
///
/// `permissions` is the granular store; `module_access` is the legacy flat
/// list of submodule ids with implicit full access. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccess {
    pub role: Role,
    pub permissions: Option<PermissionStore>,
    pub module_access: Option<Vec<String>>,
}

impl UserAccess {
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            ..Default::default()
        }
    }

    pub fn manager(permissions: PermissionStore) -> Self {
        Self {
            role: Role::Manager,
            permissions: Some(permissions),
            module_access: None,
        }
    }

    pub fn legacy(module_access: Vec<String>) -> Self {
        Self {
            role: Role::Manager,
            permissions: None,
            module_access: Some(module_access),
        }
    }

    pub fn with_module_access(mut self, module_access: Vec<String>) -> Self {
        self.module_access = Some(module_access);
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" manager ".parse::<Role>(), Ok(Role::Manager));
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_parse_lenient_never_elevates() {
        assert_eq!(Role::parse_lenient("ADMIN"), Role::Admin);
        assert_eq!(Role::parse_lenient("root"), Role::Manager);
        assert_eq!(Role::parse_lenient(""), Role::Manager);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(Role::Manager.to_string(), "Manager");
    }

    #[test]
    fn test_constructors() {
        assert!(UserAccess::admin().is_admin());
        let legacy = UserAccess::legacy(vec!["view-materials".into()]);
        assert!(!legacy.is_admin());
        assert!(legacy.permissions.is_none());
        let manager = UserAccess::manager(PermissionStore::new())
            .with_module_access(vec!["grn-entries".into()]);
        assert!(manager.permissions.is_some());
        assert_eq!(manager.module_access.as_deref(), Some(&["grn-entries".to_string()][..]));
    }
}
