//! Permission predicates.
//!
//! Every function here is total: an absent permission is `false`, never an
//! error. Resolution order for a non-admin is the granular store entry for
//! the submodule if one exists, otherwise the legacy module list.

use crate::access::UserAccess;
use crate::legacy::legacy_grants;
use crate::store::ActionGrants;
use crate::structure::Section;

/// The user's granular entry for a submodule, if any.
fn granular_entry<'a>(user: &'a UserAccess, submodule: &str) -> Option<&'a ActionGrants> {
    user.permissions.as_ref()?.entry(submodule)
}

/// Can `user` perform `action` on `submodule`?
pub fn has_permission(user: &UserAccess, submodule: &str, action: &str) -> bool {
    if user.is_admin() {
        return true;
    }
    match granular_entry(user, submodule) {
        Some(grants) => grants.get(action).copied().unwrap_or(false),
        None => legacy_grants(user, submodule),
    }
}

/// Does `user` hold at least one action on `submodule`?
pub fn has_any_permission_in_module(user: &UserAccess, submodule: &str) -> bool {
    if user.is_admin() {
        return true;
    }
    match granular_entry(user, submodule) {
        Some(grants) => grants.values().any(|granted| *granted),
        None => legacy_grants(user, submodule),
    }
}

/// Should the submodule be shown at all? A submodule with no granted action
/// is not visible.
pub fn is_module_visible(user: &UserAccess, submodule: &str) -> bool {
    has_any_permission_in_module(user, submodule)
}

/// One submodule id, or a group where any visible member is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleQuery<'a> {
    One(&'a str),
    AnyOf(&'a [&'a str]),
}

impl<'a> From<&'a str> for ModuleQuery<'a> {
    fn from(id: &'a str) -> Self {
        ModuleQuery::One(id)
    }
}

impl<'a> From<&'a [&'a str]> for ModuleQuery<'a> {
    fn from(ids: &'a [&'a str]) -> Self {
        ModuleQuery::AnyOf(ids)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for ModuleQuery<'a> {
    fn from(ids: &'a [&'a str; N]) -> Self {
        ModuleQuery::AnyOf(ids)
    }
}

impl<'a> From<&'a Vec<&'a str>> for ModuleQuery<'a> {
    fn from(ids: &'a Vec<&'a str>) -> Self {
        ModuleQuery::AnyOf(ids)
    }
}

/// Sidebar gating: a single id delegates to [`is_module_visible`]; a list is
/// granted if any member is visible. Admin sees everything, an empty list
/// included; for anyone else an empty list grants nothing.
pub fn has_module_access<'a>(user: &UserAccess, modules: impl Into<ModuleQuery<'a>>) -> bool {
    if user.is_admin() {
        return true;
    }
    match modules.into() {
        ModuleQuery::One(id) => is_module_visible(user, id),
        ModuleQuery::AnyOf(ids) => ids.iter().any(|id| is_module_visible(user, id)),
    }
}

/// Whether any submodule of `section` is visible to `user`.
pub fn has_section_access(user: &UserAccess, section: &Section) -> bool {
    let ids = section.submodule_ids();
    has_module_access(user, &ids)
}
