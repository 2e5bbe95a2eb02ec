use stockwise_core::AppError;
use stockwise_permissions::{PermissionStore, PermissionStructure, Toggle};
use tracing::{debug, instrument};

use crate::modules::permissions::model::{DraftToggleResponse, SelectionSummary};

pub struct PermissionService;

impl PermissionService {
    /// Applies one editor interaction to an unsaved draft.
    ///
    /// Nothing is persisted; the caller's store is untouched.
    #[instrument(skip(draft, structure))]
    pub fn toggle_draft(
        draft: &PermissionStore,
        toggle: &Toggle,
        structure: &PermissionStructure,
    ) -> Result<DraftToggleResponse, AppError> {
        let next = toggle.apply(draft, structure)?;
        let selection = SelectionSummary::compute(&next, structure);

        debug!(
            granted = next.granted_count(),
            overall = ?selection.overall,
            "Draft toggled"
        );

        Ok(DraftToggleResponse {
            draft: next,
            selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockwise_permissions::{SelectionState, builtin_structure};

    #[test]
    fn test_toggle_all_on_empty_draft_checks_everything() {
        let structure = builtin_structure();
        let response =
            PermissionService::toggle_draft(&PermissionStore::new(), &Toggle::All, &structure)
                .unwrap();

        assert_eq!(response.selection.overall, SelectionState::Checked);
        assert!(response.draft.is_granted("managers", "manage-permissions"));
    }

    #[test]
    fn test_unknown_section_is_bad_request() {
        let structure = builtin_structure();
        let toggle = Toggle::Section {
            section: "warehouse".into(),
        };
        let err = PermissionService::toggle_draft(&PermissionStore::new(), &toggle, &structure)
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }
}
