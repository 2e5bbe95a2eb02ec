//! # Stockwise Models
//!
//! Domain models and DTOs for the Stockwise API.
//!
//! - [`ids`]: the strongly-typed [`UserId`]
//! - [`users`]: the user entity and provisioning DTO
//! - [`permissions`]: permission editor, draft toggle and effective access bodies

pub mod ids;
pub mod permissions;
pub mod users;

pub use ids::UserId;
pub use permissions::{
    AccessResponse, ActionAccess, ClonePermissionsDto, DraftToggleRequest, DraftToggleResponse,
    PermissionEditorResponse, SavePermissionsDto, SectionAccess, SectionSelection,
    SelectionSummary, SubmoduleAccess, SubmoduleSelection,
};
pub use users::{AccessMode, CreateUserDto, ManagerSummary, User};
