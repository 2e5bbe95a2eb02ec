//! Request and response bodies for the permission endpoints.

use serde::{Deserialize, Serialize};
use stockwise_permissions::{
    PermissionStore, PermissionStructure, Role, SelectionState, Toggle, UserAccess,
    has_permission, has_section_access, is_module_visible, section_state, structure_state,
    submodule_state,
};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::UserId;

/// Rejects blank submodule or action keys in a client-supplied store.
fn validate_store_ids(store: &PermissionStore) -> Result<(), ValidationError> {
    let blank = store.iter().any(|(submodule, grants)| {
        submodule.trim().is_empty() || grants.keys().any(|action| action.trim().is_empty())
    });
    if blank {
        let mut err = ValidationError::new("blank_id");
        err.message = Some("permission ids must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Checkbox state of one submodule in the editor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmoduleSelection {
    pub submodule: String,
    #[schema(value_type = String, example = "indeterminate")]
    pub state: SelectionState,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionSelection {
    pub section: String,
    #[schema(value_type = String, example = "checked")]
    pub state: SelectionState,
    pub submodules: Vec<SubmoduleSelection>,
}

/// Tri-state selection for the whole editor tree.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionSummary {
    #[schema(value_type = String, example = "unchecked")]
    pub overall: SelectionState,
    pub sections: Vec<SectionSelection>,
}

impl SelectionSummary {
    pub fn compute(draft: &PermissionStore, structure: &PermissionStructure) -> Self {
        let sections = structure
            .sections()
            .iter()
            .map(|section| SectionSelection {
                section: section.id.clone(),
                state: section_state(draft, structure, &section.id)
                    .unwrap_or(SelectionState::Unchecked),
                submodules: section
                    .submodules
                    .iter()
                    .map(|sub| SubmoduleSelection {
                        submodule: sub.id.clone(),
                        state: submodule_state(draft, structure, &sub.id)
                            .unwrap_or(SelectionState::Unchecked),
                    })
                    .collect(),
            })
            .collect();

        Self {
            overall: structure_state(draft, structure),
            sections,
        }
    }
}

/// A user's store shaped for editing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionEditorResponse {
    pub user_id: UserId,
    pub structure_version: u32,
    #[schema(value_type = Object)]
    pub permissions: PermissionStore,
    pub selection: SelectionSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SavePermissionsDto {
    #[validate(custom(function = "validate_store_ids"))]
    #[schema(value_type = Object, example = json!({"grn-entries": {"view": true, "approve": false}}))]
    pub permissions: PermissionStore,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClonePermissionsDto {
    pub source_user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DraftToggleRequest {
    /// The editor's current, unsaved store.
    #[serde(default)]
    #[validate(custom(function = "validate_store_ids"))]
    #[schema(value_type = Object)]
    pub draft: PermissionStore,
    #[schema(value_type = Object, example = json!({"scope": "section", "section": "packing"}))]
    pub toggle: Toggle,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DraftToggleResponse {
    #[schema(value_type = Object)]
    pub draft: PermissionStore,
    pub selection: SelectionSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActionAccess {
    pub id: String,
    pub label: String,
    pub allowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmoduleAccess {
    pub id: String,
    pub display_name: String,
    pub visible: bool,
    pub actions: Vec<ActionAccess>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionAccess {
    pub id: String,
    pub display_name: String,
    pub visible: bool,
    pub submodules: Vec<SubmoduleAccess>,
}

/// Effective access of the caller, for navigation and button rendering.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessResponse {
    pub user_id: UserId,
    #[schema(value_type = String, example = "Manager")]
    pub role: Role,
    pub sections: Vec<SectionAccess>,
}

impl AccessResponse {
    pub fn evaluate(user_id: UserId, access: &UserAccess, structure: &PermissionStructure) -> Self {
        let sections = structure
            .sections()
            .iter()
            .map(|section| SectionAccess {
                id: section.id.clone(),
                display_name: section.display_name.clone(),
                visible: has_section_access(access, section),
                submodules: section
                    .submodules
                    .iter()
                    .map(|sub| SubmoduleAccess {
                        id: sub.id.clone(),
                        display_name: sub.display_name.clone(),
                        visible: is_module_visible(access, &sub.id),
                        actions: sub
                            .actions
                            .iter()
                            .map(|action| ActionAccess {
                                id: action.id.clone(),
                                label: action.label.clone(),
                                allowed: has_permission(access, &sub.id, &action.id),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            user_id,
            role: access.role,
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockwise_permissions::builtin_structure;

    #[test]
    fn test_selection_summary_marks_partial_section() {
        let structure = builtin_structure();
        let mut draft = PermissionStore::all_denied(&structure);
        draft.set("grn-reports", "view", true);

        let summary = SelectionSummary::compute(&draft, &structure);
        assert_eq!(summary.overall, SelectionState::Indeterminate);

        let grn = summary.sections.iter().find(|s| s.section == "grn").unwrap();
        assert_eq!(grn.state, SelectionState::Indeterminate);
        assert_eq!(grn.submodules[0].state, SelectionState::Unchecked);
        assert_eq!(grn.submodules[1].state, SelectionState::Indeterminate);

        let packing = summary.sections.iter().find(|s| s.section == "packing").unwrap();
        assert_eq!(packing.state, SelectionState::Unchecked);
    }

    #[test]
    fn test_access_for_legacy_manager() {
        let structure = builtin_structure();
        let access = UserAccess::legacy(vec!["grn-reports".into()]);

        let response = AccessResponse::evaluate(UserId::new(), &access, &structure);
        let grn = response.sections.iter().find(|s| s.id == "grn").unwrap();
        assert!(grn.visible);
        assert!(!grn.submodules[0].visible);
        assert!(grn.submodules[1].actions.iter().all(|a| a.allowed));

        let packing = response.sections.iter().find(|s| s.id == "packing").unwrap();
        assert!(!packing.visible);
    }

    #[test]
    fn test_blank_ids_rejected() {
        let mut store = PermissionStore::new();
        store.set(" ", "view", true);
        let dto = SavePermissionsDto { permissions: store };
        assert!(dto.validate().is_err());

        let mut store = PermissionStore::new();
        store.set("grn-entries", "view", true);
        assert!(SavePermissionsDto { permissions: store }.validate().is_ok());
    }

    #[test]
    fn test_draft_request_defaults_to_empty_draft() {
        let request: DraftToggleRequest =
            serde_json::from_str(r#"{"toggle": {"scope": "all"}}"#).unwrap();
        assert!(request.draft.is_empty());
        assert_eq!(request.toggle, Toggle::All);
    }
}
