//! Compatibility with the flat `module_access` list that predates granular
//! permissions.
//!
//! A legacy grant covers a whole submodule: every action on it is allowed.
//! It is only consulted when the user's granular store has no entry for the
//! submodule in question.

use crate::access::UserAccess;
use crate::store::PermissionStore;
use crate::structure::PermissionStructure;

/// Whether the legacy list grants `submodule`. No list means no access.
pub(crate) fn legacy_grants(user: &UserAccess, submodule: &str) -> bool {
    user.module_access
        .as_ref()
        .is_some_and(|modules| modules.iter().any(|m| m == submodule))
}

/// Converts a legacy list into an equivalent granular store.
///
/// Listed submodules that the registry knows get every action granted.
/// Everything else registered is present and denied; unknown ids are dropped.
pub fn upgrade_legacy_access<S: AsRef<str>>(
    module_access: &[S],
    structure: &PermissionStructure,
) -> PermissionStore {
    let mut store = PermissionStore::all_denied(structure);
    for id in module_access {
        if let Ok(submodule) = structure.submodule(id.as_ref()) {
            store.set_all(&submodule.id, &submodule.action_ids(), true);
        }
    }
    store
}
