pub use stockwise_models::permissions::{
    ClonePermissionsDto, PermissionEditorResponse, SavePermissionsDto,
};
pub use stockwise_models::users::{AccessMode, ManagerSummary};
