use stockwise_core::AppError;
use stockwise_db::{UserRepository, clone_user_permissions};
use stockwise_models::{User, UserId};
use stockwise_permissions::{
    PermissionError, PermissionStore, PermissionStructure, upgrade_legacy_access,
};
use tracing::{info, instrument};

use crate::metrics::{track_permission_clone, track_permissions_saved};
use crate::modules::managers::model::{ManagerSummary, PermissionEditorResponse};
use crate::modules::permissions::model::SelectionSummary;

pub struct ManagerService;

impl ManagerService {
    #[instrument(skip(repo))]
    pub async fn list_managers(repo: &dyn UserRepository) -> Result<Vec<ManagerSummary>, AppError> {
        let users = repo.list().await?;
        Ok(users.iter().map(ManagerSummary::from).collect())
    }

    /// Loads a user's store shaped for the editor.
    ///
    /// A user without a granular store starts from their legacy module list
    /// when they have one, otherwise from everything denied.
    #[instrument(skip(repo, structure))]
    pub async fn get_permissions(
        repo: &dyn UserRepository,
        structure: &PermissionStructure,
        id: UserId,
    ) -> Result<PermissionEditorResponse, AppError> {
        let user = Self::find_user(repo, id).await?;

        let permissions = match (&user.permissions, &user.module_access) {
            (Some(store), _) => store.normalized(structure),
            (None, Some(modules)) => upgrade_legacy_access(modules, structure),
            (None, None) => PermissionStore::all_denied(structure),
        };

        Ok(editor_response(id, permissions, structure))
    }

    /// Replaces the user's store wholesale with the normalized `permissions`.
    #[instrument(skip(repo, structure, permissions))]
    pub async fn save_permissions(
        repo: &dyn UserRepository,
        structure: &PermissionStructure,
        id: UserId,
        permissions: PermissionStore,
    ) -> Result<PermissionEditorResponse, AppError> {
        let normalized = permissions.normalized(structure);

        if !repo.save_permissions(id, &normalized).await? {
            return Err(PermissionError::NotFound(id.to_string()).into());
        }

        track_permissions_saved(normalized.granted_count());
        info!(user_id = %id, granted = normalized.granted_count(), "Saved permissions");

        Ok(editor_response(id, normalized, structure))
    }

    /// Replaces `target`'s store with an exact copy of `source`'s.
    #[instrument(skip(repo, structure))]
    pub async fn clone_permissions(
        repo: &dyn UserRepository,
        structure: &PermissionStructure,
        source_id: UserId,
        target_id: UserId,
    ) -> Result<PermissionEditorResponse, AppError> {
        let result = clone_user_permissions(repo, source_id, target_id).await;

        track_permission_clone(match &result {
            Ok(_) => "success",
            Err(e) if e.status.as_u16() == 400 => "invalid",
            Err(e) if e.status.as_u16() == 404 => "not_found",
            Err(_) => "error",
        });

        let store = result?;
        info!(
            source_id = %source_id,
            target_id = %target_id,
            granted = store.granted_count(),
            "Cloned permissions"
        );

        Ok(editor_response(target_id, store, structure))
    }

    async fn find_user(repo: &dyn UserRepository, id: UserId) -> Result<User, AppError> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| PermissionError::NotFound(id.to_string()).into())
    }
}

fn editor_response(
    user_id: UserId,
    permissions: PermissionStore,
    structure: &PermissionStructure,
) -> PermissionEditorResponse {
    let selection = SelectionSummary::compute(&permissions, structure);
    PermissionEditorResponse {
        user_id,
        structure_version: structure.version(),
        permissions,
        selection,
    }
}
