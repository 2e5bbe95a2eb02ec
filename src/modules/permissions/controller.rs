use axum::{Json, extract::State};
use tracing::instrument;

use stockwise_core::AppError;

use crate::middleware::auth::CurrentUser;
use crate::middleware::permission::RequireManagePermissions;
use crate::modules::permissions::model::{
    DraftToggleRequest, DraftToggleResponse, PermissionStructure,
};
use crate::modules::permissions::service::PermissionService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/permissions/structure",
    responses(
        (status = 200, description = "Permission registry: sections, submodules and their actions", body = Object),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current))]
pub async fn get_structure(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<PermissionStructure>, AppError> {
    Ok(Json(state.structure.as_ref().clone()))
}

#[utoipa::path(
    post,
    path = "/api/permissions/draft/toggle",
    request_body = DraftToggleRequest,
    responses(
        (status = 200, description = "Updated draft with selection state", body = DraftToggleResponse),
        (status = 400, description = "Unknown section, submodule or action"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires managers:manage-permissions permission"),
        (status = 422, description = "Draft contains blank ids")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _guard, request))]
pub async fn toggle_draft(
    State(state): State<AppState>,
    _guard: RequireManagePermissions,
    ValidatedJson(request): ValidatedJson<DraftToggleRequest>,
) -> Result<Json<DraftToggleResponse>, AppError> {
    let response = PermissionService::toggle_draft(&request.draft, &request.toggle, &state.structure)?;

    Ok(Json(response))
}
