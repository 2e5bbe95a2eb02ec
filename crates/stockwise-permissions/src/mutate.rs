//! Toggle operations on a draft store.
//!
//! Each operation takes the current draft by reference and returns a new
//! store; the input is never modified. Bulk toggles are all-or-nothing: if
//! the scope is fully selected it is cleared, otherwise (including a partial
//! selection) everything in scope is selected.

use serde::{Deserialize, Serialize};

use crate::error::{PermissionError, Result};
use crate::selection::{all_actions_selected, all_modules_selected, all_submodules_selected};
use crate::store::PermissionStore;
use crate::structure::PermissionStructure;

/// Flips a single action, creating the submodule entry if needed.
///
/// Flipping twice gives back a store equal to the input (see the
/// `PartialEq` impl on [`PermissionStore`]). A created entry stays behind as
/// explicit `false` values, which shadows legacy access for that submodule.
pub fn toggle_action(store: &PermissionStore, submodule: &str, action: &str) -> PermissionStore {
    let mut next = store.clone();
    next.set(submodule, action, !store.is_granted(submodule, action));
    next
}

/// Selects every listed action unless all of them already are, in which case
/// it clears them.
pub fn toggle_submodule<S: AsRef<str>>(
    store: &PermissionStore,
    submodule: &str,
    actions: &[S],
) -> PermissionStore {
    let select = !all_actions_selected(store, submodule, actions);
    let mut next = store.clone();
    next.set_all(submodule, actions, select);
    next
}

/// Section-wide all-or-nothing toggle over every registered action of every
/// submodule in the section.
pub fn toggle_section(
    store: &PermissionStore,
    structure: &PermissionStructure,
    section_id: &str,
) -> Result<PermissionStore> {
    let select = !all_submodules_selected(store, structure, section_id)?;
    let mut next = store.clone();
    for submodule in structure.submodules_of(section_id)? {
        next.set_all(&submodule.id, &submodule.action_ids(), select);
    }
    Ok(next)
}

/// Structure-wide all-or-nothing toggle.
pub fn toggle_all(store: &PermissionStore, structure: &PermissionStructure) -> PermissionStore {
    let select = !all_modules_selected(store, structure);
    let mut next = store.clone();
    for submodule in structure.submodules() {
        next.set_all(&submodule.id, &submodule.action_ids(), select);
    }
    next
}

/// A single editor interaction, checked against the registry before it is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Toggle {
    Action { submodule: String, action: String },
    Submodule { submodule: String },
    Section { section: String },
    All,
}

impl Toggle {
    /// # Errors
    ///
    /// `UnknownSubmodule` / `UnknownSection` for ids the registry does not
    /// declare and `UnknownAction` for an action the submodule does not allow.
    pub fn apply(
        &self,
        store: &PermissionStore,
        structure: &PermissionStructure,
    ) -> Result<PermissionStore> {
        match self {
            Toggle::Action { submodule, action } => {
                let declared = structure.submodule(submodule)?;
                if !declared.allows(action) {
                    return Err(PermissionError::UnknownAction {
                        submodule: submodule.clone(),
                        action: action.clone(),
                    });
                }
                Ok(toggle_action(store, submodule, action))
            }
            Toggle::Submodule { submodule } => {
                let actions = structure.actions_of(submodule)?;
                Ok(toggle_submodule(store, submodule, &actions))
            }
            Toggle::Section { section } => toggle_section(store, structure, section),
            Toggle::All => Ok(toggle_all(store, structure)),
        }
    }
}
