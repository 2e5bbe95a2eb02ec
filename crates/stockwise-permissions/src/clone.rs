//! Copying one user's permissions onto another.

use std::fmt::Display;

use tracing::warn;

use crate::access::UserAccess;
use crate::error::{PermissionError, Result};
use crate::store::PermissionStore;

/// Returns the store that replaces the target's permissions wholesale.
///
/// `source` is the looked-up source user, `None` if the lookup found nothing.
/// The result is the source's granular store exactly (empty if it has none);
/// nothing from the target survives.
///
/// # Errors
///
/// - [`PermissionError::InvalidOperation`] when source and target are the same user
/// - [`PermissionError::NotFound`] when the source user does not exist
pub fn clone_permissions<Id>(
    source_id: &Id,
    target_id: &Id,
    source: Option<&UserAccess>,
) -> Result<PermissionStore>
where
    Id: PartialEq + Display + ?Sized,
{
    if source_id == target_id {
        return Err(PermissionError::InvalidOperation(
            "Cannot clone permissions from a user onto themselves".to_string(),
        ));
    }

    let source = source.ok_or_else(|| PermissionError::NotFound(source_id.to_string()))?;

    if source.is_admin() {
        warn!(
            source_id = %source_id,
            target_id = %target_id,
            "Cloning permissions from an admin; admins carry no explicit store"
        );
    }

    Ok(source.permissions.clone().unwrap_or_default())
}
