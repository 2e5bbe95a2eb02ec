use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::access::model::{AccessResponse, ActionAccess, SectionAccess, SubmoduleAccess};
use crate::modules::managers::model::{
    AccessMode, ClonePermissionsDto, ManagerSummary, PermissionEditorResponse, SavePermissionsDto,
};
use crate::modules::permissions::model::{
    DraftToggleRequest, DraftToggleResponse, SectionSelection, SelectionSummary,
    SubmoduleSelection,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::permissions::controller::get_structure,
        crate::modules::permissions::controller::toggle_draft,
        crate::modules::access::controller::get_my_access,
        crate::modules::managers::controller::list_managers,
        crate::modules::managers::controller::get_manager_permissions,
        crate::modules::managers::controller::save_manager_permissions,
        crate::modules::managers::controller::clone_manager_permissions,
    ),
    components(
        schemas(
            AccessResponse,
            SectionAccess,
            SubmoduleAccess,
            ActionAccess,
            AccessMode,
            ManagerSummary,
            PermissionEditorResponse,
            SavePermissionsDto,
            ClonePermissionsDto,
            DraftToggleRequest,
            DraftToggleResponse,
            SelectionSummary,
            SectionSelection,
            SubmoduleSelection,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Permissions", description = "Permission registry and draft editing"),
        (name = "Access", description = "Effective access of the current user"),
        (name = "Managers", description = "Manager listing and permission administration")
    ),
    info(
        title = "Stockwise API",
        version = "0.1.0",
        description = "Granular permission management for the Stockwise back office.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
