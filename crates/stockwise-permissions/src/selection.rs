//! Aggregate "all / some selected" computations over a draft store.
//!
//! These drive the permission editor's checkboxes: checked when everything
//! under a node is granted, indeterminate when only part of it is, unchecked
//! otherwise. The draft may be a persisted store or in-progress edits.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::PermissionStore;
use crate::structure::{PermissionStructure, Section};

/// `true` iff the draft has an entry for `submodule` and every listed action
/// is granted there. With no actions listed this is just "the entry exists".
pub fn all_actions_selected<S: AsRef<str>>(
    draft: &PermissionStore,
    submodule: &str,
    actions: &[S],
) -> bool {
    draft.entry(submodule).is_some_and(|grants| {
        actions
            .iter()
            .all(|a| grants.get(a.as_ref()).copied().unwrap_or(false))
    })
}

/// `true` iff the draft has an entry for `submodule` and at least one listed
/// action is granted there.
pub fn some_actions_selected<S: AsRef<str>>(
    draft: &PermissionStore,
    submodule: &str,
    actions: &[S],
) -> bool {
    draft.entry(submodule).is_some_and(|grants| {
        actions
            .iter()
            .any(|a| grants.get(a.as_ref()).copied().unwrap_or(false))
    })
}

fn section_all(draft: &PermissionStore, section: &Section) -> bool {
    section
        .submodules
        .iter()
        .all(|s| all_actions_selected(draft, &s.id, &s.action_ids()))
}

fn section_some(draft: &PermissionStore, section: &Section) -> bool {
    section
        .submodules
        .iter()
        .any(|s| some_actions_selected(draft, &s.id, &s.action_ids()))
}

/// Every submodule of the section fully selected.
pub fn all_submodules_selected(
    draft: &PermissionStore,
    structure: &PermissionStructure,
    section_id: &str,
) -> Result<bool> {
    Ok(section_all(draft, structure.section(section_id)?))
}

/// Any submodule of the section partly selected.
pub fn some_submodules_selected(
    draft: &PermissionStore,
    structure: &PermissionStructure,
    section_id: &str,
) -> Result<bool> {
    Ok(section_some(draft, structure.section(section_id)?))
}

/// Every registered action granted.
pub fn all_modules_selected(draft: &PermissionStore, structure: &PermissionStructure) -> bool {
    structure.sections().iter().all(|s| section_all(draft, s))
}

/// At least one registered action granted.
pub fn some_modules_selected(draft: &PermissionStore, structure: &PermissionStructure) -> bool {
    structure.sections().iter().any(|s| section_some(draft, s))
}

/// Checkbox state for a node of the structure tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    Checked,
    Indeterminate,
    Unchecked,
}

impl SelectionState {
    pub fn from_flags(all: bool, some: bool) -> Self {
        if all {
            SelectionState::Checked
        } else if some {
            SelectionState::Indeterminate
        } else {
            SelectionState::Unchecked
        }
    }
}

pub fn submodule_state(
    draft: &PermissionStore,
    structure: &PermissionStructure,
    submodule_id: &str,
) -> Result<SelectionState> {
    let actions = structure.actions_of(submodule_id)?;
    Ok(SelectionState::from_flags(
        all_actions_selected(draft, submodule_id, &actions),
        some_actions_selected(draft, submodule_id, &actions),
    ))
}

pub fn section_state(
    draft: &PermissionStore,
    structure: &PermissionStructure,
    section_id: &str,
) -> Result<SelectionState> {
    let section = structure.section(section_id)?;
    Ok(SelectionState::from_flags(
        section_all(draft, section),
        section_some(draft, section),
    ))
}

pub fn structure_state(draft: &PermissionStore, structure: &PermissionStructure) -> SelectionState {
    SelectionState::from_flags(
        all_modules_selected(draft, structure),
        some_modules_selected(draft, structure),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PermissionError;
    use crate::structure::{Action, Section, Submodule};

    const ALL: [&str; 5] = ["view", "edit", "add", "delete", "view-report"];

    fn packing() -> PermissionStructure {
        let actions = ALL.iter().map(|a| Action::new(*a, *a)).collect::<Vec<_>>();
        PermissionStructure::new(
            1,
            vec![
                Section::new(
                    "packing",
                    "Packing Materials",
                    vec![
                        Submodule::new("view-materials", "Item Master", actions.clone()),
                        Submodule::new("material-stock", "Stock Levels", actions),
                    ],
                ),
                Section::new(
                    "grn",
                    "Goods Received",
                    vec![Submodule::new("grn-entries", "GRN Entries", vec![Action::new("view", "View")])],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_partial_submodule() {
        let mut draft = PermissionStore::new();
        draft.set("view-materials", "view", true);
        draft.set("view-materials", "edit", true);

        assert!(some_actions_selected(&draft, "view-materials", &ALL));
        assert!(!all_actions_selected(&draft, "view-materials", &ALL));
        assert_eq!(
            submodule_state(&draft, &packing(), "view-materials").unwrap(),
            SelectionState::Indeterminate
        );
    }

    #[test]
    fn test_missing_entry_is_neither() {
        let draft = PermissionStore::new();
        assert!(!all_actions_selected(&draft, "view-materials", &ALL));
        assert!(!some_actions_selected(&draft, "view-materials", &ALL));
    }

    #[test]
    fn test_empty_action_list() {
        let mut draft = PermissionStore::new();
        let none: [&str; 0] = [];
        assert!(!all_actions_selected(&draft, "view-materials", &none));

        draft.set_all("view-materials", &none, true);
        assert!(all_actions_selected(&draft, "view-materials", &none));
        assert!(!some_actions_selected(&draft, "view-materials", &none));
    }

    #[test]
    fn test_section_some_but_not_all() {
        let structure = packing();
        let mut draft = PermissionStore::new();
        draft.set_all("view-materials", &ALL, true);

        assert!(some_submodules_selected(&draft, &structure, "packing").unwrap());
        assert!(!all_submodules_selected(&draft, &structure, "packing").unwrap());
        assert_eq!(
            section_state(&draft, &structure, "packing").unwrap(),
            SelectionState::Indeterminate
        );
        assert_eq!(
            section_state(&draft, &structure, "grn").unwrap(),
            SelectionState::Unchecked
        );
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let structure = packing();
        let draft = PermissionStore::new();
        assert_eq!(
            all_submodules_selected(&draft, &structure, "nope"),
            Err(PermissionError::UnknownSection("nope".into()))
        );
        assert_eq!(
            submodule_state(&draft, &structure, "nope"),
            Err(PermissionError::UnknownSubmodule("nope".into()))
        );
    }

    #[test]
    fn test_whole_structure() {
        let structure = packing();
        let mut draft = PermissionStore::all_denied(&structure);
        assert_eq!(structure_state(&draft, &structure), SelectionState::Unchecked);

        draft.set("grn-entries", "view", true);
        assert_eq!(structure_state(&draft, &structure), SelectionState::Indeterminate);

        draft.set_all("view-materials", &ALL, true);
        draft.set_all("material-stock", &ALL, true);
        assert!(all_modules_selected(&draft, &structure));
        assert_eq!(structure_state(&draft, &structure), SelectionState::Checked);
    }

    #[test]
    fn test_selection_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SelectionState::Indeterminate).unwrap(),
            "\"indeterminate\""
        );
    }
}
