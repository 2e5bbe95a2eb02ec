//! Back-office users as seen by the permissions service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockwise_permissions::{PermissionStore, Role, UserAccess};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

/// A manager or admin account.
///
/// `permissions` is the granular store and `module_access` the legacy flat
/// list; older accounts may carry either, both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[schema(value_type = String, example = "Manager")]
    pub role: Role,
    #[schema(value_type = Option<Object>)]
    pub permissions: Option<PermissionStore>,
    pub module_access: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A new account with a fresh id, no legacy list and both timestamps set
    /// to now.
    pub fn provision(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        permissions: Option<PermissionStore>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            permissions,
            module_access: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The evaluation engine's view of this user.
    pub fn access(&self) -> UserAccess {
        UserAccess {
            role: self.role,
            permissions: self.permissions.clone(),
            module_access: self.module_access.clone(),
        }
    }

    pub fn access_mode(&self) -> AccessMode {
        if self.role.is_admin() {
            AccessMode::Full
        } else if self.permissions.is_some() {
            AccessMode::Granular
        } else if self.module_access.is_some() {
            AccessMode::Legacy
        } else {
            AccessMode::None
        }
    }
}

/// How a user's access is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Admin, everything allowed.
    Full,
    /// Has a granular permission store.
    Granular,
    /// Only the legacy module list.
    Legacy,
    None,
}

/// Input for provisioning a user.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[schema(value_type = String, example = "Manager")]
    pub role: Role,
}

/// Row in the managers listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManagerSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[schema(value_type = String, example = "Manager")]
    pub role: Role,
    pub access_mode: AccessMode,
    /// Number of explicitly granted actions (0 for admins and legacy users).
    pub granted_actions: usize,
}

impl From<&User> for ManagerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            access_mode: user.access_mode(),
            granted_actions: user
                .permissions
                .as_ref()
                .map(PermissionStore::granted_count)
                .unwrap_or(0),
        }
    }
}
