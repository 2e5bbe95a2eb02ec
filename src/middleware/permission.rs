//! Granular permission guards.
//!
//! Handlers take one of the `Require*` extractors below; the request is
//! rejected with 403 unless the caller's stored permissions allow the
//! submodule action.

use stockwise_core::AppError;
use stockwise_models::User;
use stockwise_permissions::has_permission;
use tracing::warn;

use crate::metrics::track_permission_denied;

/// Fails with 403 unless `user` may perform `action` on `submodule`.
pub fn check_permission(user: &User, submodule: &str, action: &str) -> Result<(), AppError> {
    if has_permission(&user.access(), submodule, action) {
        return Ok(());
    }

    warn!(
        user_id = %user.id,
        submodule = submodule,
        action = action,
        "Permission denied"
    );
    track_permission_denied(submodule, action);

    Err(AppError::forbidden(format!(
        "Access denied. Missing required permission: {}:{}",
        submodule, action
    )))
}

/// Defines an extractor that loads the current user and checks one
/// submodule action.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $submodule:path, $action:path) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::CurrentUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = stockwise_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let current = <$crate::middleware::auth::CurrentUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::permission::check_permission(&current.0, $submodule, $action)?;

                Ok($name(current))
            }
        }
    };
}

use stockwise_permissions::catalog::{MANAGE_PERMISSIONS, MANAGERS, VIEW};

require_permission!(RequireManagersView, MANAGERS, VIEW);
require_permission!(RequireManagePermissions, MANAGERS, MANAGE_PERMISSIONS);
