use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use stockwise_core::AppError;
use stockwise_models::UserId;

use crate::middleware::permission::{RequireManagePermissions, RequireManagersView};
use crate::modules::managers::model::{
    ClonePermissionsDto, ManagerSummary, PermissionEditorResponse, SavePermissionsDto,
};
use crate::modules::managers::service::ManagerService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/managers",
    responses(
        (status = 200, description = "Users with their role and access mode", body = Vec<ManagerSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires managers:view permission")
    ),
    tag = "Managers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _guard))]
pub async fn list_managers(
    State(state): State<AppState>,
    _guard: RequireManagersView,
) -> Result<Json<Vec<ManagerSummary>>, AppError> {
    let managers = ManagerService::list_managers(state.users.as_ref()).await?;

    Ok(Json(managers))
}

#[utoipa::path(
    get,
    path = "/api/managers/{id}/permissions",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Normalized store and selection state", body = PermissionEditorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires managers:manage-permissions permission"),
        (status = 404, description = "User not found")
    ),
    tag = "Managers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _guard))]
pub async fn get_manager_permissions(
    State(state): State<AppState>,
    _guard: RequireManagePermissions,
    Path(id): Path<UserId>,
) -> Result<Json<PermissionEditorResponse>, AppError> {
    let response =
        ManagerService::get_permissions(state.users.as_ref(), &state.structure, id).await?;

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/managers/{id}/permissions",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = SavePermissionsDto,
    responses(
        (status = 200, description = "Permissions saved", body = PermissionEditorResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires managers:manage-permissions permission"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Store contains blank ids")
    ),
    tag = "Managers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _guard, dto))]
pub async fn save_manager_permissions(
    State(state): State<AppState>,
    _guard: RequireManagePermissions,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<SavePermissionsDto>,
) -> Result<Json<PermissionEditorResponse>, AppError> {
    let response = ManagerService::save_permissions(
        state.users.as_ref(),
        &state.structure,
        id,
        dto.permissions,
    )
    .await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/managers/{id}/permissions/clone",
    params(
        ("id" = String, Path, description = "Target user ID")
    ),
    request_body = ClonePermissionsDto,
    responses(
        (status = 200, description = "Permissions cloned", body = PermissionEditorResponse),
        (status = 400, description = "Source and target are the same user"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires managers:manage-permissions permission"),
        (status = 404, description = "Source or target user not found")
    ),
    tag = "Managers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _guard))]
pub async fn clone_manager_permissions(
    State(state): State<AppState>,
    _guard: RequireManagePermissions,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<ClonePermissionsDto>,
) -> Result<Json<PermissionEditorResponse>, AppError> {
    let response = ManagerService::clone_permissions(
        state.users.as_ref(),
        &state.structure,
        dto.source_user_id,
        id,
    )
    .await?;

    Ok(Json(response))
}
