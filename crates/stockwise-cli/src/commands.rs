use std::fmt::Write as _;

use anyhow::anyhow;
use stockwise_auth::create_access_token;
use stockwise_config::JwtConfig;
use stockwise_core::AppError;
use stockwise_db::UserRepository;
use stockwise_models::{CreateUserDto, User, UserId};
use stockwise_permissions::{
    PermissionError, PermissionStore, PermissionStructure, Role, upgrade_legacy_access,
};
use tracing::info;
use validator::Validate;

/// Renders the registry as an indented tree.
pub fn render_structure(structure: &PermissionStructure) -> String {
    let mut out = format!("Permission structure v{}\n", structure.version());
    for section in structure.sections() {
        let _ = writeln!(out, "{} ({})", section.display_name, section.id);
        for sub in &section.submodules {
            let _ = writeln!(out, "  {} ({})", sub.display_name, sub.id);
            if sub.actions.is_empty() {
                let _ = writeln!(out, "    (no actions)");
            }
            for action in &sub.actions {
                let _ = writeln!(out, "    - {} [{}]", action.label, action.id);
            }
        }
    }
    out
}

/// Provisions a user. Managers start with every registered action denied;
/// admins carry no store.
pub async fn create_manager(
    repo: &dyn UserRepository,
    structure: &PermissionStructure,
    dto: CreateUserDto,
) -> Result<User, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow!("{}", e)))?;

    let permissions = match dto.role {
        Role::Admin => None,
        Role::Manager => Some(PermissionStore::all_denied(structure)),
    };

    let user = repo
        .insert(User::provision(dto.name, dto.email, dto.role, permissions))
        .await?;

    info!(user_id = %user.id, role = %user.role, "Provisioned user");
    Ok(user)
}

/// Replaces `to`'s permissions with a copy of `from`'s.
pub async fn clone_user_permissions(
    repo: &dyn UserRepository,
    from: UserId,
    to: UserId,
) -> Result<PermissionStore, AppError> {
    let store = stockwise_db::clone_user_permissions(repo, from, to).await?;
    info!(source_id = %from, target_id = %to, granted = store.granted_count(), "Cloned permissions");
    Ok(store)
}

/// Converts a user's legacy module list into a granular store and saves it.
pub async fn upgrade_legacy(
    repo: &dyn UserRepository,
    structure: &PermissionStructure,
    id: UserId,
) -> Result<PermissionStore, AppError> {
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| PermissionError::NotFound(id.to_string()))?;

    let Some(module_access) = user.module_access.as_deref() else {
        return Err(AppError::bad_request(anyhow!(
            "User {} has no legacy module access to upgrade",
            id
        )));
    };

    let store = upgrade_legacy_access(module_access, structure);
    if !repo.save_permissions(id, &store).await? {
        return Err(PermissionError::NotFound(id.to_string()).into());
    }

    info!(user_id = %id, modules = module_access.len(), "Upgraded legacy module access");
    Ok(store)
}

/// Mints an access token the API will accept for an existing user.
pub async fn issue_token(
    repo: &dyn UserRepository,
    jwt_config: &JwtConfig,
    id: UserId,
) -> Result<String, AppError> {
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| PermissionError::NotFound(id.to_string()))?;

    let token = create_access_token(id.into_inner(), &user.email, user.role.as_str(), jwt_config)?;
    info!(user_id = %id, role = %user.role, "Issued access token");
    Ok(token)
}
