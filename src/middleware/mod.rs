//! Request extractors for authentication and granular authorization.
//!
//! - [`auth`]: bearer token validation and the reloaded [`auth::CurrentUser`]
//! - [`permission`]: `(submodule, action)` guards built with `require_permission!`
//!
//! ```ignore
//! use crate::middleware::permission::RequireManagePermissions;
//!
//! async fn save(
//!     RequireManagePermissions(current): RequireManagePermissions,
//! ) -> impl IntoResponse {
//!     // Only runs if the caller holds managers:manage-permissions
//! }
//! ```

pub mod auth;
pub mod permission;
